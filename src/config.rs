use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Tiempo máximo de espera de la consulta de stock; al expirar se rechaza el add
    pub network_timeout_seconds: u32,
    pub pricing: PricingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:3000".to_string(),
            backend_url_production: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 10,
            pricing: PricingConfig::default(),
        }
    }
}

/// Reglas de precio del resumen de pedido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// A partir de este subtotal el envío es gratis (estrictamente mayor)
    pub free_shipping_threshold: f64,
    pub shipping_price: f64,
    pub tax_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 200.0,
            shipping_price: 15.0,
            tax_rate: 0.15,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let pricing = PricingConfig::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_development),
            // Producción: mismo origen (rutas /api relativas) salvo que se indique otra cosa
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .unwrap_or("10").parse().unwrap_or(10),
            pricing: PricingConfig {
                free_shipping_threshold: option_env!("FREE_SHIPPING_THRESHOLD")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(pricing.free_shipping_threshold),
                shipping_price: option_env!("SHIPPING_PRICE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(pricing.shipping_price),
                tax_rate: option_env!("TAX_RATE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(pricing.tax_rate),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Timeout de red en milisegundos (formato que espera gloo-timers)
    pub fn network_timeout_millis(&self) -> u32 {
        self.network_timeout_seconds.saturating_mul(1000)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
