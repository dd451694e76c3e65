// ============================================================================
// CHECKOUT VIEWMODEL - Shipping -> Payment -> Place Order
// ============================================================================

use crate::config::PricingConfig;
use crate::error::CheckoutError;
use crate::models::{OrderRequest, OrderSummary, PaymentMethod, ShippingAddress};
use crate::services::OrderGateway;
use crate::state::{guard, Action, CheckoutStep, GuardDecision, Route, SessionStore};
use crate::utils::KeyValueStore;

/// ViewModel del funnel de checkout - SOLO lógica, la vista navega con las rutas devueltas
pub struct CheckoutViewModel<S: KeyValueStore, O: OrderGateway> {
    store: SessionStore<S>,
    orders: O,
    pricing: PricingConfig,
}

impl<S: KeyValueStore, O: OrderGateway> CheckoutViewModel<S, O> {
    pub fn new(store: SessionStore<S>, orders: O, pricing: PricingConfig) -> Self {
        Self { store, orders, pricing }
    }

    /// Evaluación única al montar una página del funnel
    pub fn enter(&self, route: &Route) -> GuardDecision {
        let decision = self.store.read(|s| guard(route, s));
        if let GuardDecision::Redirect(target) = &decision {
            log::info!("↩️ [CHECKOUT] {} -> {}", route.path(), target.path());
        }
        decision
    }

    /// Formulario de envío enviado: guarda y avanza a Payment
    pub fn submit_shipping(&self, address: ShippingAddress) -> Result<Route, CheckoutError> {
        self.require(&Route::Shipping)?;
        if let Some(field) = address.missing_field() {
            return Err(CheckoutError::IncompleteAddress(field));
        }
        self.store.dispatch(Action::SaveShippingAddress(address));
        Ok(Route::Payment)
    }

    /// Dirección guardada para pre-rellenar el formulario de envío
    pub fn saved_shipping_address(&self) -> ShippingAddress {
        self.store
            .read(|s| s.cart.shipping_address.clone())
            .unwrap_or_default()
    }

    /// Método guardado (sobrevive a recargas) para pre-seleccionar el radio
    pub fn preselected_payment_method(&self) -> Option<PaymentMethod> {
        self.store.read(|s| s.cart.payment_method)
    }

    pub fn submit_payment(&self, method: Option<PaymentMethod>) -> Result<Route, CheckoutError> {
        self.require(&Route::Payment)?;
        let method = method.ok_or(CheckoutError::PaymentMethodRequired)?;
        self.store.dispatch(Action::SavePaymentMethod(method));
        Ok(Route::PlaceOrder)
    }

    /// "Back": ruta del paso anterior, sin tocar el estado
    pub fn back(&self, step: CheckoutStep) -> Route {
        match step.previous() {
            Some(CheckoutStep::Login) | None => Route::Cart,
            Some(previous) => previous.route(),
        }
    }

    pub fn order_summary(&self) -> OrderSummary {
        self.store
            .read(|s| OrderSummary::compute(&s.cart, &self.pricing))
    }

    /// Paso terminal. Éxito: CART_RESET y ruta del pedido.
    /// Fallo: estado intacto para reintentar sin volver a rellenar nada.
    pub async fn place_order(&self) -> Result<Route, CheckoutError> {
        self.require(&Route::PlaceOrder)?;

        let snapshot = self.store.snapshot();
        if snapshot.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let (shipping_address, payment_method, user) = match (
            snapshot.cart.shipping_address.clone(),
            snapshot.cart.payment_method,
            snapshot.user_info.clone(),
        ) {
            (Some(address), Some(method), Some(user)) => (address, method, user),
            // El guard ya lo garantiza; se deja como precondición explícita
            _ => return Err(CheckoutError::PreconditionUnmet(Route::Payment)),
        };

        let request = OrderRequest {
            order_items: snapshot.cart.cart_items.clone(),
            shipping_address,
            payment_method,
            summary: OrderSummary::compute(&snapshot.cart, &self.pricing),
        };

        match self.orders.place_order(&request, &user.token).await {
            Ok(order) => {
                log::info!("✅ [CHECKOUT] Pedido {} creado", order.id);
                self.store.dispatch(Action::CartReset);
                Ok(Route::Order { id: order.id })
            }
            Err(e) => {
                log::error!("❌ [CHECKOUT] Error creando pedido: {}", e);
                Err(CheckoutError::OrderPlacementFailure(e))
            }
        }
    }

    fn require(&self, route: &Route) -> Result<(), CheckoutError> {
        match self.enter(route) {
            GuardDecision::Proceed => Ok(()),
            GuardDecision::Redirect(target) => Err(CheckoutError::PreconditionUnmet(target)),
        }
    }
}
