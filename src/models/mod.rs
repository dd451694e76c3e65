pub mod auth;
pub mod cart;
pub mod order;
pub mod product;

pub use auth::{ApiMessage, LoginRequest, RegisterRequest, UserSession};
pub use cart::{CartLine, CartState, PaymentMethod, ShippingAddress, UnknownPaymentMethod};
pub use order::{OrderRequest, OrderSummary, PlacedOrder};
pub use product::Product;
