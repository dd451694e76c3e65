//! Fixtures y fakes de las fronteras para los tests del crate.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ApiError, StorageError};
use crate::models::{
    CartLine, LoginRequest, OrderRequest, PlacedOrder, Product, RegisterRequest, ShippingAddress,
    UserSession,
};
use crate::services::{AuthGateway, OrderGateway, StockGateway};
use crate::utils::KeyValueStore;

pub fn product(id: &str, count_in_stock: u32) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        slug: format!("product-{}", id),
        price: 10.0,
        image: format!("/images/{}.jpg", id),
        count_in_stock,
    }
}

pub fn line(id: &str, quantity: u32) -> CartLine {
    CartLine::from_product(&product(id, 10), quantity)
}

pub fn user() -> UserSession {
    UserSession {
        id: "u1".to_string(),
        name: "Sita".to_string(),
        email: "sita@pasal.np".to_string(),
        is_admin: false,
        token: "token-u1".to_string(),
    }
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Sita Sharma".to_string(),
        address: "Thamel Marg 12".to_string(),
        city: "Kathmandu".to_string(),
        postal_code: "44600".to_string(),
        country: "Nepal".to_string(),
    }
}

type FetchHook = Box<dyn FnMut(&str)>;

/// Inventario en memoria. `during_fetch` corre mientras la consulta "está en vuelo".
#[derive(Clone, Default)]
pub struct FakeCatalog {
    products: Rc<RefCell<HashMap<String, Product>>>,
    failure: Rc<RefCell<Option<ApiError>>>,
    hook: Rc<RefCell<Option<FetchHook>>>,
    pub fetches: Rc<Cell<u32>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stock(&self, id: &str, count_in_stock: u32) {
        self.products
            .borrow_mut()
            .insert(id.to_string(), product(id, count_in_stock));
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub fn during_fetch(&self, hook: impl FnMut(&str) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }
}

impl StockGateway for FakeCatalog {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(hook) = self.hook.borrow_mut().as_mut() {
            hook(product_id);
        }
        if let Some(error) = self.failure.borrow().clone() {
            return Err(error);
        }
        self.products
            .borrow()
            .get(product_id)
            .cloned()
            .ok_or(ApiError::Http { status: 404, message: "Product not found".to_string() })
    }
}

/// Backend de usuarios en memoria (email -> (password, sesión))
#[derive(Clone, Default)]
pub struct FakeAuth {
    users: Rc<RefCell<HashMap<String, (String, UserSession)>>>,
    pub calls: Rc<Cell<u32>>,
}

impl FakeAuth {
    pub fn with_user(email: &str, password: &str) -> Self {
        let auth = Self::default();
        let session = UserSession {
            email: email.to_string(),
            ..user()
        };
        auth.users
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), session));
        auth
    }
}

impl AuthGateway for FakeAuth {
    async fn login(&self, request: &LoginRequest) -> Result<UserSession, ApiError> {
        self.calls.set(self.calls.get() + 1);
        match self.users.borrow().get(&request.email) {
            Some((password, session)) if *password == request.password => Ok(session.clone()),
            _ => Err(ApiError::Http {
                status: 401,
                message: "Invalid email or password".to_string(),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserSession, ApiError> {
        self.calls.set(self.calls.get() + 1);
        if self.users.borrow().contains_key(&request.email) {
            return Err(ApiError::Http { status: 422, message: "Email already exists".to_string() });
        }
        let session = UserSession {
            id: format!("u{}", self.users.borrow().len() + 1),
            name: request.name.clone(),
            email: request.email.clone(),
            is_admin: false,
            token: format!("token-{}", request.email),
        };
        self.users.borrow_mut().insert(
            request.email.clone(),
            (request.password.clone(), session.clone()),
        );
        Ok(session)
    }
}

/// Servidor de pedidos en memoria; guarda lo recibido
#[derive(Clone, Default)]
pub struct FakeOrders {
    failure: Rc<RefCell<Option<ApiError>>>,
    pub received: Rc<RefCell<Vec<(OrderRequest, String)>>>,
}

impl FakeOrders {
    pub fn failing(error: ApiError) -> Self {
        let orders = Self::default();
        *orders.failure.borrow_mut() = Some(error);
        orders
    }
}

impl OrderGateway for FakeOrders {
    async fn place_order(
        &self,
        order: &OrderRequest,
        token: &str,
    ) -> Result<PlacedOrder, ApiError> {
        if let Some(error) = self.failure.borrow().clone() {
            return Err(error);
        }
        self.received
            .borrow_mut()
            .push((order.clone(), token.to_string()));
        Ok(PlacedOrder {
            id: format!("order-{}", self.received.borrow().len()),
        })
    }

    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError> {
        if let Some(error) = self.failure.borrow().clone() {
            return Err(error);
        }
        Ok(format!("paypal-for-{}", token))
    }
}

/// Backend completo: catálogo, usuarios y pedidos en memoria
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub catalog: FakeCatalog,
    pub auth: FakeAuth,
    pub orders: FakeOrders,
}

impl StockGateway for FakeBackend {
    async fn fetch_product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.catalog.fetch_product(product_id).await
    }
}

impl AuthGateway for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> Result<UserSession, ApiError> {
        self.auth.login(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserSession, ApiError> {
        self.auth.register(request).await
    }
}

impl OrderGateway for FakeBackend {
    async fn place_order(
        &self,
        order: &OrderRequest,
        token: &str,
    ) -> Result<PlacedOrder, ApiError> {
        self.orders.place_order(order, token).await
    }

    async fn paypal_client_id(&self, token: &str) -> Result<String, ApiError> {
        self.orders.paypal_client_id(token).await
    }
}

/// Storage sin cuota: toda operación falla
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStorage;

impl KeyValueStore for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read { key: key.to_string() })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write { key: key.to_string() })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Remove { key: key.to_string() })
    }
}
