pub mod auth_viewmodel;
pub mod cart_viewmodel;
pub mod checkout_viewmodel;
pub mod storefront_viewmodel;

pub use auth_viewmodel::{AuthViewModel, LoginForm, RegisterForm};
pub use cart_viewmodel::{AddedToCart, CartViewModel};
pub use checkout_viewmodel::CheckoutViewModel;
pub use storefront_viewmodel::{StorefrontBackend, StorefrontViewModel};
