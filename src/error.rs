// ============================================================================
// ERRORES - un enum por frontera (storage, API, carrito, checkout, auth)
// ============================================================================
// El reducer nunca falla; todo lo que puede fallar vive en las fronteras.
// ============================================================================

use thiserror::Error;

use crate::state::Route;

/// Fallos del almacenamiento persistente (localStorage o equivalente)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder al almacenamiento")]
    Unavailable,
    #[error("Error leyendo '{key}' del almacenamiento")]
    Read { key: String },
    #[error("Error guardando '{key}' en el almacenamiento")]
    Write { key: String },
    #[error("Error eliminando '{key}' del almacenamiento")]
    Remove { key: String },
}

/// Fallos de comunicación con el backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    /// Respuesta no-2xx; `message` es el `message` del cuerpo JSON o el status text
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Request timed out after {millis} ms")]
    Timeout { millis: u32 },
}

/// Fallos del flujo de carrito
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("Sorry. Product is out of stock")]
    StockInsufficient {
        product_id: String,
        requested: u32,
        count_in_stock: u32,
    },
    /// La consulta de stock no se pudo completar: se rechaza igual que sin stock
    #[error("Could not verify stock: {0}")]
    StockCheckFailed(ApiError),
    #[error("Product {0} is not in the cart")]
    NotInCart(String),
}

/// Fallos del funnel de checkout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// No es un error visible: la vista redirige a la ruta indicada
    #[error("Checkout step not available yet, redirecting to {}", .0.path())]
    PreconditionUnmet(Route),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("{0} is required")]
    IncompleteAddress(&'static str),
    #[error("Payment Method is required.")]
    PaymentMethodRequired,
    #[error("{0}")]
    OrderPlacementFailure(ApiError),
    /// No se pudo obtener la configuración del proveedor de pago
    #[error("{0}")]
    PaymentSetup(ApiError),
}

/// Validación de los formularios de login/registro (mensajes del formulario original)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name length should be more than 1 characters.")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Email is not valid.")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password length should be more than 5 characters.")]
    PasswordTooShort,
    #[error("Confirm Password is required")]
    ConfirmPasswordRequired,
    #[error("Confirm Password length should be more than 5 characters.")]
    ConfirmPasswordTooShort,
    #[error("Passwords do not match!")]
    PasswordMismatch,
}

/// Fallos de login/registro
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] FormError),
    #[error("{0}")]
    Rejected(ApiError),
}
