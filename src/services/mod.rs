pub mod api_client;
pub mod auth_service;
pub mod order_service;
pub mod session_persistence;
pub mod stock_service;

pub use api_client::ApiClient;
pub use auth_service::AuthGateway;
pub use order_service::OrderGateway;
pub use session_persistence::SessionPersistence;
pub use stock_service::{Availability, StockGateway, StockService};
