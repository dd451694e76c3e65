// ============================================================================
// CONSTANTES - claves de almacenamiento y rutas del API
// ============================================================================

/// Claves del almacenamiento persistente de la sesión (compatibles con las cookies originales)
pub const STORAGE_KEY_DARK_MODE: &str = "darkMode";
pub const STORAGE_KEY_CART_ITEMS: &str = "cartItems";
pub const STORAGE_KEY_SHIPPING_ADDRESS: &str = "shippingAddress";
pub const STORAGE_KEY_PAYMENT_METHOD: &str = "paymentMethod";
pub const STORAGE_KEY_USER_INFO: &str = "userInfo";

/// Valores serializados de `darkMode`
pub const DARK_MODE_ON: &str = "ON";
pub const DARK_MODE_OFF: &str = "OFF";

pub const API_PRODUCTS: &str = "/api/products";
pub const API_USERS_LOGIN: &str = "/api/users/login";
pub const API_USERS_REGISTER: &str = "/api/users/register";
pub const API_ORDERS: &str = "/api/orders";
pub const API_KEYS_PAYPAL: &str = "/api/keys/paypal";

/// Client id de PayPal sandbox cuando el servidor no tiene uno configurado
pub const PAYPAL_SANDBOX_CLIENT_ID: &str = "sb";
