// ============================================================================
// CHECKOUT GUARD - decide en cada entrada de página si se sigue o se redirige
// ============================================================================
// Solo lectura sobre SessionState. Las precondiciones son encadenadas: la
// redirección va al primer requisito no cumplido (Payment sin usuario -> Login).
// ============================================================================

use crate::state::{CheckoutStep, Route, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Route),
}

/// Paso más avanzado del funnel cuyas precondiciones (encadenadas) se cumplen
pub fn next_allowed_step(state: &SessionState) -> CheckoutStep {
    if state.user_info.is_none() {
        CheckoutStep::Login
    } else if !state.cart.has_shipping_address() {
        CheckoutStep::Shipping
    } else if state.cart.payment_method.is_none() {
        CheckoutStep::Payment
    } else {
        CheckoutStep::PlaceOrder
    }
}

/// Evaluación única al montar la página `route`
pub fn guard(route: &Route, state: &SessionState) -> GuardDecision {
    match route {
        // Precondición invertida: con sesión iniciada no se ve login/registro
        Route::Login { .. } | Route::Register { .. } => {
            if state.is_logged_in() {
                GuardDecision::Redirect(Route::Home)
            } else {
                GuardDecision::Proceed
            }
        }
        Route::Shipping | Route::Payment | Route::PlaceOrder => {
            let requested = match route.checkout_step() {
                Some(step) => step,
                None => return GuardDecision::Proceed,
            };
            guard_step(requested, route, state)
        }
        Route::Home | Route::Cart | Route::Order { .. } => GuardDecision::Proceed,
    }
}

fn guard_step(requested: CheckoutStep, route: &Route, state: &SessionState) -> GuardDecision {
    let allowed = next_allowed_step(state);
    if requested <= allowed {
        return GuardDecision::Proceed;
    }
    match allowed {
        // Tras el login se vuelve a la página pedida (y se re-evalúa allí)
        CheckoutStep::Login => GuardDecision::Redirect(Route::login_then(route)),
        step => GuardDecision::Redirect(step.route()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use crate::state::{reduce, Action};
    use crate::test_support::{address, user};

    fn state_with(actions: Vec<Action>) -> SessionState {
        actions.into_iter().fold(SessionState::default(), reduce)
    }

    #[test]
    fn anonymous_payment_goes_to_login_not_shipping() {
        let state = SessionState::default();
        assert_eq!(
            guard(&Route::Payment, &state),
            GuardDecision::Redirect(Route::Login { redirect: Some("/payment".to_string()) })
        );
    }

    #[test]
    fn anonymous_payment_with_stale_address_still_goes_to_login() {
        let state = state_with(vec![Action::SaveShippingAddress(address())]);
        assert!(matches!(
            guard(&Route::Payment, &state),
            GuardDecision::Redirect(Route::Login { .. })
        ));
    }

    #[test]
    fn shipping_requires_user() {
        let state = SessionState::default();
        assert_eq!(
            guard(&Route::Shipping, &state),
            GuardDecision::Redirect(Route::Login { redirect: Some("/shipping".to_string()) })
        );
        let state = state_with(vec![Action::UserLogin(user())]);
        assert_eq!(guard(&Route::Shipping, &state), GuardDecision::Proceed);
    }

    #[test]
    fn payment_without_address_goes_to_shipping() {
        let state = state_with(vec![Action::UserLogin(user())]);
        assert_eq!(guard(&Route::Payment, &state), GuardDecision::Redirect(Route::Shipping));
    }

    #[test]
    fn place_order_without_method_goes_to_payment() {
        let state = state_with(vec![
            Action::UserLogin(user()),
            Action::SaveShippingAddress(address()),
        ]);
        assert_eq!(guard(&Route::PlaceOrder, &state), GuardDecision::Redirect(Route::Payment));
    }

    #[test]
    fn place_order_with_method_but_no_address_goes_to_shipping() {
        let state = state_with(vec![
            Action::UserLogin(user()),
            Action::SavePaymentMethod(PaymentMethod::PayPal),
        ]);
        assert_eq!(guard(&Route::PlaceOrder, &state), GuardDecision::Redirect(Route::Shipping));
    }

    #[test]
    fn complete_session_reaches_every_step() {
        let state = state_with(vec![
            Action::UserLogin(user()),
            Action::SaveShippingAddress(address()),
            Action::SavePaymentMethod(PaymentMethod::Cash),
        ]);
        assert_eq!(next_allowed_step(&state), CheckoutStep::PlaceOrder);
        for route in [Route::Shipping, Route::Payment, Route::PlaceOrder] {
            assert_eq!(guard(&route, &state), GuardDecision::Proceed);
        }
    }

    #[test]
    fn logged_in_user_is_sent_away_from_auth_pages() {
        let state = state_with(vec![Action::UserLogin(user())]);
        assert_eq!(
            guard(&Route::Login { redirect: Some("/shipping".to_string()) }, &state),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(
            guard(&Route::Register { redirect: None }, &state),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(
            guard(&Route::Login { redirect: None }, &SessionState::default()),
            GuardDecision::Proceed
        );
    }

    #[test]
    fn guard_never_mutates_state() {
        let state = state_with(vec![Action::UserLogin(user())]);
        let before = state.clone();
        let _ = guard(&Route::PlaceOrder, &state);
        assert_eq!(state, before);
    }
}
