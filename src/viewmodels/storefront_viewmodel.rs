// ============================================================================
// STOREFRONT VIEWMODEL - compone carrito, checkout y auth sobre una sesión
// ============================================================================

use crate::config::PricingConfig;
use crate::error::CheckoutError;
use crate::services::{AuthGateway, OrderGateway, StockGateway};
use crate::state::{Route, SessionStore};
use crate::utils::KeyValueStore;
use crate::viewmodels::{AuthViewModel, CartViewModel, CheckoutViewModel};

/// Backend con todas las fronteras de la tienda (el `ApiClient` en el navegador)
pub trait StorefrontBackend: StockGateway + AuthGateway + OrderGateway + Clone {}

impl<T: StockGateway + AuthGateway + OrderGateway + Clone> StorefrontBackend for T {}

pub struct StorefrontViewModel<S: KeyValueStore, B: StorefrontBackend> {
    store: SessionStore<S>,
    backend: B,
    pricing: PricingConfig,
}

impl<S: KeyValueStore, B: StorefrontBackend> Clone for StorefrontViewModel<S, B> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            backend: self.backend.clone(),
            pricing: self.pricing.clone(),
        }
    }
}

impl<S: KeyValueStore, B: StorefrontBackend> StorefrontViewModel<S, B> {
    pub fn new(store: SessionStore<S>, backend: B, pricing: PricingConfig) -> Self {
        Self {
            store,
            backend,
            pricing,
        }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn cart(&self) -> CartViewModel<S, B> {
        CartViewModel::new(self.store.clone(), self.backend.clone())
    }

    pub fn checkout(&self) -> CheckoutViewModel<S, B> {
        CheckoutViewModel::new(
            self.store.clone(),
            self.backend.clone(),
            self.pricing.clone(),
        )
    }

    pub fn auth(&self) -> AuthViewModel<S, B> {
        AuthViewModel::new(self.store.clone(), self.backend.clone())
    }

    /// Client id para los botones de PayPal de la página del pedido
    pub async fn paypal_client_id(&self) -> Result<String, CheckoutError> {
        let token = self
            .store
            .read(|s| s.user_info.as_ref().map(|u| u.token.clone()))
            .ok_or_else(|| {
                CheckoutError::PreconditionUnmet(Route::login_then(&Route::PlaceOrder))
            })?;

        self.backend.paypal_client_id(&token).await.map_err(|e| {
            log::error!("❌ [CHECKOUT] Sin client id de PayPal: {}", e);
            CheckoutError::PaymentSetup(e)
        })
    }
}
