use crate::models::{CartLine, PaymentMethod, ShippingAddress, UserSession};

/// Acciones que acepta el reducer de sesión. Conjunto cerrado.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DarkModeOn,
    DarkModeOff,
    /// Inserta la línea o sobrescribe la cantidad de la existente (no incrementa).
    /// Cantidad 0 elimina la línea.
    CartAddItem(CartLine),
    CartRemoveItem { product_id: String },
    /// Tras un pedido: vacía líneas, dirección y método de pago
    CartReset,
    SaveShippingAddress(ShippingAddress),
    SavePaymentMethod(PaymentMethod),
    UserLogin(UserSession),
    /// Reset completo de sesión salvo `dark_mode`
    UserLogout,
}

impl Action {
    /// Nombre corto para logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::DarkModeOn => "DARK_MODE_ON",
            Action::DarkModeOff => "DARK_MODE_OFF",
            Action::CartAddItem(_) => "CART_ADD_ITEM",
            Action::CartRemoveItem { .. } => "CART_REMOVE_ITEM",
            Action::CartReset => "CART_RESET",
            Action::SaveShippingAddress(_) => "SAVE_SHIPPING_ADDRESS",
            Action::SavePaymentMethod(_) => "SAVE_PAYMENT_METHOD",
            Action::UserLogin(_) => "USER_LOGIN",
            Action::UserLogout => "USER_LOGOUT",
        }
    }
}
