// ============================================================================
// CART VIEWMODEL - añadir / ajustar / quitar productos con control de stock
// ============================================================================
// Flujo: leer cantidad -> consultar stock (await) -> RE-LEER cantidad -> dispatch.
// La segunda lectura evita perder incrementos cuando otro "add" aterriza
// mientras la consulta está en vuelo.
// ============================================================================

use crate::error::CartError;
use crate::models::{CartLine, Product};
use crate::services::{StockGateway, StockService};
use crate::state::{guard, Action, GuardDecision, Route, SessionStore};
use crate::utils::KeyValueStore;

/// Resultado de "Add to cart": cantidad nueva y página a la que ir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedToCart {
    pub quantity: u32,
    pub next: Route,
}

pub struct CartViewModel<S: KeyValueStore, G: StockGateway> {
    store: SessionStore<S>,
    stock: StockService<G>,
}

impl<S: KeyValueStore, G: StockGateway> CartViewModel<S, G> {
    pub fn new(store: SessionStore<S>, gateway: G) -> Self {
        Self {
            store,
            stock: StockService::new(gateway),
        }
    }

    /// "Add to cart": una unidad más de `product`; después se navega al carrito
    pub async fn add_to_cart(&self, product: &Product) -> Result<AddedToCart, CartError> {
        let requested = one_more(
            self.current_quantity(&product.id),
            &product.id,
            product.count_in_stock,
        )?;
        let count_in_stock = self.fetch_stock(&product.id, requested).await?;

        // La sesión pudo cambiar durante la consulta
        let quantity = one_more(self.current_quantity(&product.id), &product.id, count_in_stock)?;
        if quantity > count_in_stock {
            log::info!(
                "🚫 [CART] {} cambió durante la consulta de stock ({} > {})",
                product.id,
                quantity,
                count_in_stock
            );
            return Err(CartError::StockInsufficient {
                product_id: product.id.clone(),
                requested: quantity,
                count_in_stock,
            });
        }

        let line = CartLine {
            count_in_stock,
            ..CartLine::from_product(product, quantity)
        };
        self.store.dispatch(Action::CartAddItem(line));
        log::info!("🛒 [CART] {} x{}", product.id, quantity);
        Ok(AddedToCart {
            quantity,
            next: Route::Cart,
        })
    }

    /// Selector de cantidad del carrito: fija una cantidad exacta. 0 quita la línea.
    pub async fn update_quantity(&self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        let existing = self
            .store
            .read(|s| s.cart.find(product_id).cloned())
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let count_in_stock = self.fetch_stock(product_id, quantity).await?;
        // Si la línea desapareció mientras tanto no se resucita
        if !self.store.read(|s| s.cart.find(product_id).is_some()) {
            return Err(CartError::NotInCart(product_id.to_string()));
        }

        self.store.dispatch(Action::CartAddItem(CartLine {
            quantity,
            count_in_stock,
            ..existing
        }));
        Ok(())
    }

    pub fn remove_item(&self, product_id: &str) {
        log::info!("🗑️ [CART] Quitando {}", product_id);
        self.store.dispatch(Action::CartRemoveItem {
            product_id: product_id.to_string(),
        });
    }

    /// Destino del botón "Check Out"
    pub fn checkout_route(&self) -> Route {
        match self.store.read(|s| guard(&Route::Shipping, s)) {
            GuardDecision::Proceed => Route::Shipping,
            GuardDecision::Redirect(route) => route,
        }
    }

    fn current_quantity(&self, product_id: &str) -> u32 {
        self.store.read(|s| s.cart.quantity_of(product_id))
    }

    /// Stock actual si alcanza para `requested`; cualquier fallo rechaza (falla cerrado)
    async fn fetch_stock(&self, product_id: &str, requested: u32) -> Result<u32, CartError> {
        let availability = self
            .stock
            .check_availability(product_id, requested)
            .await
            .map_err(|e| {
                log::warn!("⚠️ [CART] No se pudo verificar stock de {}: {}", product_id, e);
                CartError::StockCheckFailed(e)
            })?;

        if availability.is_available() {
            Ok(availability.count_in_stock())
        } else {
            Err(CartError::StockInsufficient {
                product_id: product_id.to_string(),
                requested,
                count_in_stock: availability.count_in_stock(),
            })
        }
    }
}

/// `current + 1`; una cantidad ya en el máximo nunca puede ampliarse
fn one_more(current: u32, product_id: &str, count_in_stock: u32) -> Result<u32, CartError> {
    current
        .checked_add(1)
        .ok_or_else(|| CartError::StockInsufficient {
            product_id: product_id.to_string(),
            requested: current,
            count_in_stock,
        })
}
