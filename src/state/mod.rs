// ============================================================================
// STATE MODULE - sesión, reducer, store y guard del checkout
// ============================================================================

pub mod actions;
pub mod checkout_guard;
pub mod route;
pub mod session_state;
pub mod store;

pub use actions::Action;
pub use checkout_guard::{guard, next_allowed_step, GuardDecision};
pub use route::{resolve_redirect, CheckoutStep, Route};
pub use session_state::{reduce, SessionState};
pub use store::SessionStore;
