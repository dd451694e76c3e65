// ============================================================================
// AUTH VIEWMODEL - login / registro / logout
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AuthError, FormError};
use crate::models::{LoginRequest, RegisterRequest, UserSession};
use crate::services::AuthGateway;
use crate::state::{guard, resolve_redirect, Action, GuardDecision, Route, SessionStore};
use crate::utils::KeyValueStore;

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}$").expect("email pattern is valid");
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        if self.name.is_empty() {
            return Err(FormError::NameRequired);
        }
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(FormError::NameTooShort);
        }
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.confirm_password.is_empty() {
            return Err(FormError::ConfirmPasswordRequired);
        }
        if self.confirm_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::ConfirmPasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

fn validate_email(email: &str) -> Result<(), FormError> {
    if email.is_empty() {
        Err(FormError::EmailRequired)
    } else if !EMAIL_PATTERN.is_match(email) {
        Err(FormError::EmailInvalid)
    } else {
        Ok(())
    }
}

fn validate_password(password: &str) -> Result<(), FormError> {
    if password.is_empty() {
        Err(FormError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(FormError::PasswordTooShort)
    } else {
        Ok(())
    }
}

/// ViewModel de autenticación: valida, llama al backend y actualiza la sesión
pub struct AuthViewModel<S: KeyValueStore, A: AuthGateway> {
    store: SessionStore<S>,
    auth: A,
}

impl<S: KeyValueStore, A: AuthGateway> AuthViewModel<S, A> {
    pub fn new(store: SessionStore<S>, auth: A) -> Self {
        Self { store, auth }
    }

    /// Al montar login/registro: con sesión iniciada se vuelve a la tienda
    pub fn enter_auth_page(&self) -> GuardDecision {
        self.store.read(|s| guard(&Route::Login { redirect: None }, s))
    }

    /// Login; devuelve la ruta a la que navegar (`redirect` o la tienda)
    pub async fn login(
        &self,
        form: &LoginForm,
        redirect: Option<&str>,
    ) -> Result<Route, AuthError> {
        let request = form.validate()?;
        let user = self.auth.login(&request).await.map_err(|e| {
            log::error!("❌ [AUTH] Error en login: {}", e);
            AuthError::Rejected(e)
        })?;
        Ok(self.sign_in(user, redirect))
    }

    pub async fn register(
        &self,
        form: &RegisterForm,
        redirect: Option<&str>,
    ) -> Result<Route, AuthError> {
        let request = form.validate()?;
        let user = self.auth.register(&request).await.map_err(|e| {
            log::error!("❌ [AUTH] Error en registro: {}", e);
            AuthError::Rejected(e)
        })?;
        Ok(self.sign_in(user, redirect))
    }

    /// Logout completo: usuario y carrito fuera, darkMode se queda
    pub fn logout(&self) -> Route {
        log::info!("👋 [AUTH] Logout - limpiando la sesión");
        self.store.dispatch(Action::UserLogout);
        Route::Home
    }

    fn sign_in(&self, user: UserSession, redirect: Option<&str>) -> Route {
        log::info!("✅ [AUTH] Sesión iniciada: {}", user.email);
        self.store.dispatch(Action::UserLogin(user));
        resolve_redirect(redirect)
    }
}
