// ============================================================================
// SESSION STATE - snapshot de la sesión + reducer puro
// ============================================================================

use crate::models::{CartLine, CartState, UserSession};
use crate::state::Action;

/// Estado completo de la sesión del navegador
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub dark_mode: bool,
    pub cart: CartState,
    /// `None` = anónimo
    pub user_info: Option<UserSession>,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user_info.is_some()
    }
}

/// Transición pura y total: toda acción produce un estado, ninguna falla.
pub fn reduce(state: SessionState, action: Action) -> SessionState {
    match action {
        Action::DarkModeOn => SessionState { dark_mode: true, ..state },
        Action::DarkModeOff => SessionState { dark_mode: false, ..state },
        Action::CartAddItem(item) => SessionState {
            cart: CartState {
                cart_items: upsert_line(state.cart.cart_items, item),
                ..state.cart
            },
            ..state
        },
        Action::CartRemoveItem { product_id } => {
            let mut cart_items = state.cart.cart_items;
            cart_items.retain(|line| line.product_id != product_id);
            SessionState {
                cart: CartState { cart_items, ..state.cart },
                ..state
            }
        }
        Action::CartReset => SessionState {
            cart: CartState::default(),
            ..state
        },
        Action::SaveShippingAddress(address) => SessionState {
            cart: CartState {
                shipping_address: Some(address),
                ..state.cart
            },
            ..state
        },
        Action::SavePaymentMethod(method) => SessionState {
            cart: CartState {
                payment_method: Some(method),
                ..state.cart
            },
            ..state
        },
        Action::UserLogin(user) => SessionState {
            user_info: Some(user),
            ..state
        },
        Action::UserLogout => SessionState {
            dark_mode: state.dark_mode,
            ..SessionState::default()
        },
    }
}

/// Sustituye la línea del mismo producto en su posición o la añade al final.
/// Una cantidad 0 nunca se guarda: elimina la línea.
fn upsert_line(mut lines: Vec<CartLine>, item: CartLine) -> Vec<CartLine> {
    let existing = lines.iter().position(|line| line.product_id == item.product_id);
    match (existing, item.quantity) {
        (Some(index), 0) => {
            lines.remove(index);
        }
        (Some(index), _) => lines[index] = item,
        (None, 0) => {}
        (None, _) => lines.push(item),
    }
    lines
}
