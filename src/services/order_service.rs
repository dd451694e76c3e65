use crate::error::ApiError;
use crate::models::{OrderRequest, PlacedOrder};

/// Frontera de creación de pedidos (validación y pago viven en el servidor)
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    async fn place_order(&self, order: &OrderRequest, token: &str)
        -> Result<PlacedOrder, ApiError>;

    /// Client id público del proveedor de pago (PayPal)
    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError>;
}
