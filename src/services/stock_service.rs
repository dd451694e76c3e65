// ============================================================================
// STOCK SERVICE - reconciliación de stock antes de tocar el carrito
// ============================================================================
// Nunca forma parte del reducer: se consulta ANTES del dispatch.
// ============================================================================

use crate::error::ApiError;
use crate::models::Product;

/// Consulta de inventario en vivo
#[allow(async_fn_in_trait)]
pub trait StockGateway {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, ApiError>;
}

/// Resultado de la consulta de stock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available { count_in_stock: u32 },
    Insufficient { count_in_stock: u32 },
}

impl Availability {
    pub fn evaluate(count_in_stock: u32, requested: u32) -> Self {
        if count_in_stock < requested {
            Availability::Insufficient { count_in_stock }
        } else {
            Availability::Available { count_in_stock }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available { .. })
    }

    pub fn count_in_stock(&self) -> u32 {
        match self {
            Availability::Available { count_in_stock }
            | Availability::Insufficient { count_in_stock } => *count_in_stock,
        }
    }
}

pub struct StockService<G: StockGateway> {
    gateway: G,
}

impl<G: StockGateway> StockService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// ¿Hay `requested` unidades de `product_id`? Un error de red o timeout
    /// se devuelve como error y el llamador NO debe mutar el carrito.
    pub async fn check_availability(
        &self,
        product_id: &str,
        requested: u32,
    ) -> Result<Availability, ApiError> {
        let product = self.gateway.fetch_product(product_id).await?;
        let availability = Availability::evaluate(product.count_in_stock, requested);
        if !availability.is_available() {
            log::info!(
                "🚫 [STOCK] {}: pedido {}, disponible {}",
                product_id,
                requested,
                product.count_in_stock
            );
        }
        Ok(availability)
    }
}
