use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, UserSession};

/// Frontera de autenticación: intercambia credenciales por una `UserSession`
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<UserSession, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<UserSession, ApiError>;
}
