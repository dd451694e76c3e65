// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP al REST de la tienda
// ============================================================================

use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{
    ApiMessage, LoginRequest, OrderRequest, PlacedOrder, Product, RegisterRequest, UserSession,
};
use crate::services::{AuthGateway, OrderGateway, StockGateway};
use crate::utils::{
    API_KEYS_PAYPAL, API_ORDERS, API_PRODUCTS, API_USERS_LOGIN, API_USERS_REGISTER,
    PAYPAL_SANDBOX_CLIENT_ID,
};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout_millis: u32,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_millis: CONFIG.network_timeout_millis(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Obtener producto (stock actual). Con timeout: al expirar, falla cerrado.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, ApiError> {
        let url = self.url(&format!("{}/{}", API_PRODUCTS, product_id));
        log::debug!("📦 [API] Consultando stock de {}", product_id);

        with_timeout(self.timeout_millis, async {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            parse_json::<Product>(response).await
        })
        .await
    }

    /// Login con email + password
    pub async fn login(&self, request: &LoginRequest) -> Result<UserSession, ApiError> {
        log::info!("🔐 [API] Login para: {}", request.email);
        let response = Request::post(&self.url(API_USERS_LOGIN))
            .json(request)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(response).await
    }

    /// Registro de un usuario nuevo (devuelve la sesión ya iniciada)
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserSession, ApiError> {
        log::info!("📝 [API] Registro para: {}", request.email);
        let response = Request::post(&self.url(API_USERS_REGISTER))
            .json(request)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(response).await
    }

    /// Crear pedido con el token del usuario
    pub async fn create_order(
        &self,
        order: &OrderRequest,
        token: &str,
    ) -> Result<PlacedOrder, ApiError> {
        log::info!("🧾 [API] Creando pedido: {} líneas", order.order_items.len());
        let response = Request::post(&self.url(API_ORDERS))
            .header("Authorization", &bearer(token))
            .json(order)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(response).await
    }

    /// Client id de PayPal configurado en el servidor ("sb" si no hay)
    pub async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError> {
        let response = Request::get(&self.url(API_KEYS_PAYPAL))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        let client_id = response
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(non_empty_or_sandbox(client_id))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StockGateway for ApiClient {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.get_product(product_id).await
    }
}

impl AuthGateway for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<UserSession, ApiError> {
        ApiClient::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserSession, ApiError> {
        ApiClient::register(self, request).await
    }
}

impl OrderGateway for ApiClient {
    async fn place_order(
        &self,
        order: &OrderRequest,
        token: &str,
    ) -> Result<PlacedOrder, ApiError> {
        self.create_order(order, token).await
    }

    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError> {
        ApiClient::paypal_client_id(self, token).await
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn non_empty_or_sandbox(client_id: String) -> String {
    let trimmed = client_id.trim();
    if trimmed.is_empty() {
        PAYPAL_SANDBOX_CLIENT_ID.to_string()
    } else {
        trimmed.to_string()
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Mensaje del servidor (`{ "message": ... }`) o status text como fallback
async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let fallback = format!("HTTP {}: {}", status, response.status_text());
    let message = match response.text().await {
        Ok(body) => server_message(&body).unwrap_or(fallback),
        Err(_) => fallback,
    };
    log::warn!("⚠️ [API] {}", message);
    ApiError::Http { status, message }
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.is_empty())
}

/// Corre `request` con un límite de `millis`; expirar es `ApiError::Timeout`
async fn with_timeout<T>(
    millis: u32,
    request: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let request = Box::pin(request);
    let timeout = TimeoutFuture::new(millis);
    match select(request, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("⏱️ [API] Timeout tras {} ms", millis);
            Err(ApiError::Timeout { millis })
        }
    }
}
