// ============================================================================
// ROUTES - páginas de la tienda y pasos del checkout
// ============================================================================

use url::form_urlencoded;

/// Páginas de la tienda que participan en la navegación del núcleo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Cart,
    Login { redirect: Option<String> },
    Register { redirect: Option<String> },
    Shipping,
    Payment,
    PlaceOrder,
    Order { id: String },
}

impl Route {
    pub fn login_then(route: &Route) -> Route {
        Route::Login { redirect: Some(route.path()) }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Login { redirect } => with_redirect("/login", redirect.as_deref()),
            Route::Register { redirect } => with_redirect("/register", redirect.as_deref()),
            Route::Shipping => "/shipping".to_string(),
            Route::Payment => "/payment".to_string(),
            Route::PlaceOrder => "/placeorder".to_string(),
            Route::Order { id } => format!("/order/{}", id),
        }
    }

    /// Interpreta un path con query (`/login?redirect=/shipping`)
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let redirect = query.and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "redirect")
                .map(|(_, value)| value.into_owned())
        });

        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Some(Route::Home),
            "/cart" => Some(Route::Cart),
            "/login" => Some(Route::Login { redirect }),
            "/register" => Some(Route::Register { redirect }),
            "/shipping" => Some(Route::Shipping),
            "/payment" => Some(Route::Payment),
            "/placeorder" => Some(Route::PlaceOrder),
            other => other
                .strip_prefix("/order/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::Order { id: id.to_string() }),
        }
    }

    /// Paso del funnel al que corresponde la ruta
    pub fn checkout_step(&self) -> Option<CheckoutStep> {
        match self {
            Route::Login { .. } | Route::Register { .. } => Some(CheckoutStep::Login),
            Route::Shipping => Some(CheckoutStep::Shipping),
            Route::Payment => Some(CheckoutStep::Payment),
            Route::PlaceOrder => Some(CheckoutStep::PlaceOrder),
            _ => None,
        }
    }
}

fn with_redirect(base: &str, redirect: Option<&str>) -> String {
    match redirect {
        Some(target) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("redirect", target)
                .finish();
            format!("{}?{}", base, query)
        }
        None => base.to_string(),
    }
}

/// Destino tras login/registro. Solo se aceptan paths del mismo origen.
pub fn resolve_redirect(redirect: Option<&str>) -> Route {
    redirect
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
        .and_then(Route::parse)
        .unwrap_or(Route::Home)
}

/// Pasos del wizard de checkout, en orden
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    Login,
    Shipping,
    Payment,
    PlaceOrder,
}

impl CheckoutStep {
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Login,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::PlaceOrder,
    ];

    /// `activeStep` del wizard
    pub fn index(&self) -> usize {
        match self {
            CheckoutStep::Login => 0,
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::PlaceOrder => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Login => "Login",
            CheckoutStep::Shipping => "Shipping Address",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::PlaceOrder => "Place Order",
        }
    }

    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Login => None,
            CheckoutStep::Shipping => Some(CheckoutStep::Login),
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::PlaceOrder => Some(CheckoutStep::Payment),
        }
    }

    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Login => Some(CheckoutStep::Shipping),
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::PlaceOrder),
            CheckoutStep::PlaceOrder => None,
        }
    }

    pub fn route(&self) -> Route {
        match self {
            CheckoutStep::Login => Route::Login { redirect: None },
            CheckoutStep::Shipping => Route::Shipping,
            CheckoutStep::Payment => Route::Payment,
            CheckoutStep::PlaceOrder => Route::PlaceOrder,
        }
    }
}
