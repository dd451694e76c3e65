// ============================================================================
// BINDINGS - fachada expuesta a JS (la vista solo habla con esto)
// ============================================================================
// Las acciones que navegan devuelven el path destino; los errores llegan a JS
// como el mensaje que se muestra al usuario.
// ============================================================================

use std::fmt::Display;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::models::{PaymentMethod, Product, ShippingAddress};
use crate::services::ApiClient;
use crate::state::{guard, GuardDecision, Route, SessionStore};
use crate::utils::LocalStorage;
use crate::viewmodels::{LoginForm, RegisterForm, StorefrontViewModel};

fn to_js(error: impl Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub struct Storefront {
    app: StorefrontViewModel<LocalStorage, ApiClient>,
}

#[wasm_bindgen]
impl Storefront {
    /// Hidrata la sesión desde localStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> Storefront {
        log::info!("🏪 [BINDINGS] Storefront contra {}", CONFIG.backend_url());
        Storefront {
            app: StorefrontViewModel::new(
                SessionStore::hydrate(LocalStorage::new()),
                ApiClient::new(),
                CONFIG.pricing.clone(),
            ),
        }
    }

    #[wasm_bindgen(js_name = darkMode)]
    pub fn dark_mode(&self) -> bool {
        self.app.store().read(|s| s.dark_mode)
    }

    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&self) {
        self.app.store().toggle_dark_mode();
    }

    /// Líneas del carrito como JSON (mismo formato que `cartItems`)
    #[wasm_bindgen(js_name = cartItems)]
    pub fn cart_items(&self) -> Result<String, JsValue> {
        self.app
            .store()
            .read(|s| serde_json::to_string(&s.cart.cart_items))
            .map_err(to_js)
    }

    /// Ruta a la que redirigir antes de montar `path`, o `undefined` si puede continuar
    #[wasm_bindgen(js_name = guardPath)]
    pub fn guard_path(&self, path: &str) -> Option<String> {
        let route = Route::parse(path)?;
        match self.app.store().read(|s| guard(&route, s)) {
            GuardDecision::Proceed => None,
            GuardDecision::Redirect(target) => Some(target.path()),
        }
    }

    /// Resuelve con el path del carrito o rechaza con el aviso de stock
    #[wasm_bindgen(js_name = addToCart)]
    pub fn add_to_cart(&self, product_json: &str) -> Result<js_sys::Promise, JsValue> {
        let product: Product = serde_json::from_str(product_json).map_err(to_js)?;
        let app = self.app.clone();

        Ok(wasm_bindgen_futures::future_to_promise(async move {
            app.cart()
                .add_to_cart(&product)
                .await
                .map(|added| JsValue::from_str(&added.next.path()))
                .map_err(to_js)
        }))
    }

    #[wasm_bindgen(js_name = updateQuantity)]
    pub fn update_quantity(&self, product_id: String, quantity: u32) -> js_sys::Promise {
        let app = self.app.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            app.cart()
                .update_quantity(&product_id, quantity)
                .await
                .map(|_| JsValue::UNDEFINED)
                .map_err(to_js)
        })
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, product_id: &str) {
        self.app.cart().remove_item(product_id);
    }

    /// Destino del botón "Check Out" del carrito
    #[wasm_bindgen(js_name = checkoutPath)]
    pub fn checkout_path(&self) -> String {
        self.app.cart().checkout_route().path()
    }

    pub fn login(
        &self,
        email: String,
        password: String,
        redirect: Option<String>,
    ) -> js_sys::Promise {
        let app = self.app.clone();
        let form = LoginForm { email, password };
        wasm_bindgen_futures::future_to_promise(async move {
            app.auth()
                .login(&form, redirect.as_deref())
                .await
                .map(|route| JsValue::from_str(&route.path()))
                .map_err(to_js)
        })
    }

    pub fn register(
        &self,
        name: String,
        email: String,
        password: String,
        confirm_password: String,
        redirect: Option<String>,
    ) -> js_sys::Promise {
        let app = self.app.clone();
        let form = RegisterForm {
            name,
            email,
            password,
            confirm_password,
        };
        wasm_bindgen_futures::future_to_promise(async move {
            app.auth()
                .register(&form, redirect.as_deref())
                .await
                .map(|route| JsValue::from_str(&route.path()))
                .map_err(to_js)
        })
    }

    pub fn logout(&self) -> String {
        self.app.auth().logout().path()
    }

    /// Dirección guardada (JSON) para pre-rellenar el formulario de envío
    #[wasm_bindgen(js_name = savedShippingAddress)]
    pub fn saved_shipping_address(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.checkout().saved_shipping_address()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = submitShipping)]
    pub fn submit_shipping(&self, address_json: &str) -> Result<String, JsValue> {
        let address: ShippingAddress = serde_json::from_str(address_json).map_err(to_js)?;
        self.app
            .checkout()
            .submit_shipping(address)
            .map(|route| route.path())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = preselectedPaymentMethod)]
    pub fn preselected_payment_method(&self) -> Option<String> {
        self.app
            .checkout()
            .preselected_payment_method()
            .map(|method| method.to_string())
    }

    #[wasm_bindgen(js_name = submitPayment)]
    pub fn submit_payment(&self, method: Option<String>) -> Result<String, JsValue> {
        let method = method
            .map(|raw| raw.parse::<PaymentMethod>())
            .transpose()
            .map_err(to_js)?;
        self.app
            .checkout()
            .submit_payment(method)
            .map(|route| route.path())
            .map_err(to_js)
    }

    /// Precios del resumen del pedido como JSON
    #[wasm_bindgen(js_name = orderSummary)]
    pub fn order_summary(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.checkout().order_summary()).map_err(to_js)
    }

    /// Resuelve con `/order/{id}`; si falla el estado queda intacto para reintentar
    #[wasm_bindgen(js_name = placeOrder)]
    pub fn place_order(&self) -> js_sys::Promise {
        let app = self.app.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            app.checkout()
                .place_order()
                .await
                .map(|route| JsValue::from_str(&route.path()))
                .map_err(to_js)
        })
    }

    #[wasm_bindgen(js_name = paypalClientId)]
    pub fn paypal_client_id(&self) -> js_sys::Promise {
        let app = self.app.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            app.paypal_client_id()
                .await
                .map(|client_id| JsValue::from_str(&client_id))
                .map_err(to_js)
        })
    }

    /// `callback()` tras cada cambio de estado
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.app.store().subscribe(move |_| {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                web_sys::console::error_2(&JsValue::from_str("❌ [BINDINGS] onChange:"), &e);
            }
        });
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}
