// ============================================================================
// SESSION PERSISTENCE - espejo de los fragmentos de sesión en storage
// ============================================================================
// Hidratación al arrancar + escritura de los fragmentos que cambian tras cada
// dispatch. Las escrituras son best-effort: un fallo se registra y se descarta,
// nunca afecta al estado en memoria.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::models::{CartLine, CartState, PaymentMethod, ShippingAddress, UserSession};
use crate::state::SessionState;
use crate::utils::{
    KeyValueStore, DARK_MODE_OFF, DARK_MODE_ON, STORAGE_KEY_CART_ITEMS, STORAGE_KEY_DARK_MODE,
    STORAGE_KEY_PAYMENT_METHOD, STORAGE_KEY_SHIPPING_ADDRESS, STORAGE_KEY_USER_INFO,
};

#[derive(Clone, Debug)]
pub struct SessionPersistence<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SessionPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reconstruye la sesión; una clave ausente o corrupta vale su default
    pub fn hydrate(&self) -> SessionState {
        let dark_mode = self
            .read_raw(STORAGE_KEY_DARK_MODE)
            .map(|value| value == DARK_MODE_ON)
            .unwrap_or(false);

        let cart_items = self
            .read_json::<Vec<CartLine>>(STORAGE_KEY_CART_ITEMS)
            .map(sanitize_lines)
            .unwrap_or_default();

        let shipping_address = self.read_json::<ShippingAddress>(STORAGE_KEY_SHIPPING_ADDRESS);

        let payment_method = self
            .read_raw(STORAGE_KEY_PAYMENT_METHOD)
            .and_then(|raw| match raw.parse::<PaymentMethod>() {
                Ok(method) => Some(method),
                Err(e) => {
                    log::warn!("⚠️ [STORAGE] Ignorando {}: {}", STORAGE_KEY_PAYMENT_METHOD, e);
                    None
                }
            });

        let user_info = self.read_json::<UserSession>(STORAGE_KEY_USER_INFO);

        log::info!(
            "📋 [STORAGE] Sesión hidratada: {} líneas, usuario: {}, darkMode: {}",
            cart_items.len(),
            user_info.as_ref().map(|u| u.email.as_str()).unwrap_or("anónimo"),
            dark_mode
        );

        SessionState {
            dark_mode,
            cart: CartState {
                cart_items,
                shipping_address,
                payment_method,
            },
            user_info,
        }
    }

    /// Escribe los fragmentos que cambian entre `prev` y `next`
    pub fn persist_changes(&self, prev: &SessionState, next: &SessionState) {
        if prev.dark_mode != next.dark_mode {
            let value = if next.dark_mode { DARK_MODE_ON } else { DARK_MODE_OFF };
            self.best_effort(STORAGE_KEY_DARK_MODE, self.storage.set(STORAGE_KEY_DARK_MODE, value));
        }
        if prev.cart.cart_items != next.cart.cart_items {
            if next.cart.cart_items.is_empty() {
                self.remove(STORAGE_KEY_CART_ITEMS);
            } else {
                self.write_json(STORAGE_KEY_CART_ITEMS, &next.cart.cart_items);
            }
        }
        if prev.cart.shipping_address != next.cart.shipping_address {
            match &next.cart.shipping_address {
                Some(address) => self.write_json(STORAGE_KEY_SHIPPING_ADDRESS, address),
                None => self.remove(STORAGE_KEY_SHIPPING_ADDRESS),
            }
        }
        if prev.cart.payment_method != next.cart.payment_method {
            match next.cart.payment_method {
                Some(method) => self.best_effort(
                    STORAGE_KEY_PAYMENT_METHOD,
                    self.storage.set(STORAGE_KEY_PAYMENT_METHOD, method.as_str()),
                ),
                None => self.remove(STORAGE_KEY_PAYMENT_METHOD),
            }
        }
        if prev.user_info != next.user_info {
            match &next.user_info {
                Some(user) => self.write_json(STORAGE_KEY_USER_INFO, user),
                None => self.remove(STORAGE_KEY_USER_INFO),
            }
        }
    }

    /// Escribe todos los fragmentos
    #[cfg(test)]
    pub fn persist_all(&self, state: &SessionState) {
        let empty = SessionState {
            dark_mode: !state.dark_mode,
            ..SessionState::default()
        };
        self.persist_changes(&empty, state);
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ [STORAGE] {}", e);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!(
                    "⚠️ [STORAGE] '{}' corrupto, se usa el valor por defecto: {}",
                    key,
                    e
                );
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.best_effort(key, self.storage.set(key, &json)),
            Err(e) => log::warn!("⚠️ [STORAGE] Error serializando '{}': {}", key, e),
        }
    }

    fn remove(&self, key: &str) {
        self.best_effort(key, self.storage.remove(key));
    }

    fn best_effort(&self, key: &str, result: Result<(), StorageError>) {
        match result {
            Ok(()) => log::debug!("💾 [STORAGE] '{}' actualizado", key),
            Err(e) => log::warn!("⚠️ [STORAGE] Escritura descartada: {}", e),
        }
    }
}

/// Las invariantes del carrito valen también para datos que vienen de storage:
/// sin cantidades 0 y sin productos repetidos (gana la primera línea).
fn sanitize_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut clean: Vec<CartLine> = Vec::with_capacity(lines.len());
    for mut line in lines {
        // Nunca más unidades que el stock visto al añadir
        line.quantity = line.quantity.min(line.count_in_stock);
        if line.quantity == 0 || clean.iter().any(|l| l.product_id == line.product_id) {
            continue;
        }
        clean.push(line);
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{reduce, Action};
    use crate::test_support::{address, line, user, FailingStorage};
    use crate::utils::MemoryStorage;

    fn populated() -> SessionState {
        [
            Action::DarkModeOn,
            Action::UserLogin(user()),
            Action::CartAddItem(line("p1", 2)),
            Action::CartAddItem(line("p2", 1)),
            Action::SaveShippingAddress(address()),
            Action::SavePaymentMethod(PaymentMethod::Stripe),
        ]
        .into_iter()
        .fold(SessionState::default(), reduce)
    }

    #[test]
    fn empty_storage_hydrates_defaults() {
        let persistence = SessionPersistence::new(MemoryStorage::new());
        assert_eq!(persistence.hydrate(), SessionState::default());
    }

    #[test]
    fn persisted_fragments_reload_equal() {
        let storage = MemoryStorage::new();
        let persistence = SessionPersistence::new(storage.clone());
        let state = populated();
        persistence.persist_changes(&SessionState::default(), &state);

        let reloaded = SessionPersistence::new(storage).hydrate();
        assert_eq!(reloaded, state);
    }

    #[test]
    fn wire_values_match_cookie_format() {
        let storage = MemoryStorage::new();
        SessionPersistence::new(storage.clone()).persist_all(&populated());
        assert_eq!(storage.get(STORAGE_KEY_DARK_MODE).unwrap().as_deref(), Some("ON"));
        assert_eq!(storage.get(STORAGE_KEY_PAYMENT_METHOD).unwrap().as_deref(), Some("Stripe"));
        let user_json = storage.get(STORAGE_KEY_USER_INFO).unwrap().unwrap();
        assert!(user_json.contains("\"isAdmin\""));
    }

    #[test]
    fn logout_removes_session_keys_but_keeps_dark_mode() {
        let storage = MemoryStorage::new();
        let persistence = SessionPersistence::new(storage.clone());
        let before = populated();
        persistence.persist_all(&before);

        let after = reduce(before.clone(), Action::UserLogout);
        persistence.persist_changes(&before, &after);

        assert!(!storage.contains_key(STORAGE_KEY_USER_INFO));
        assert!(!storage.contains_key(STORAGE_KEY_CART_ITEMS));
        assert!(!storage.contains_key(STORAGE_KEY_SHIPPING_ADDRESS));
        assert!(!storage.contains_key(STORAGE_KEY_PAYMENT_METHOD));
        assert_eq!(storage.get(STORAGE_KEY_DARK_MODE).unwrap().as_deref(), Some("ON"));
        assert_eq!(persistence.hydrate(), after);
    }

    #[test]
    fn corrupt_fragments_fall_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_CART_ITEMS, "{not json").unwrap();
        storage.set(STORAGE_KEY_USER_INFO, r#"{"name":"half"}"#).unwrap();
        storage.set(STORAGE_KEY_PAYMENT_METHOD, "Bitcoin").unwrap();
        storage.set(STORAGE_KEY_DARK_MODE, "ON").unwrap();

        let state = SessionPersistence::new(storage).hydrate();
        assert!(state.cart.cart_items.is_empty());
        assert!(state.user_info.is_none());
        assert!(state.cart.payment_method.is_none());
        assert!(state.dark_mode);
    }

    #[test]
    fn hydration_restores_cart_invariants() {
        let storage = MemoryStorage::new();
        let lines = vec![line("a", 1), line("b", 0), line("a", 5)];
        storage
            .set(STORAGE_KEY_CART_ITEMS, &serde_json::to_string(&lines).unwrap())
            .unwrap();

        let state = SessionPersistence::new(storage).hydrate();
        assert_eq!(state.cart.cart_items, vec![line("a", 1)]);
    }

    #[test]
    fn hydrated_quantities_never_exceed_recorded_stock() {
        let storage = MemoryStorage::new();
        let sold_out = CartLine {
            count_in_stock: 0,
            ..line("b", 2)
        };
        let lines = vec![line("a", u32::MAX), sold_out];
        storage
            .set(STORAGE_KEY_CART_ITEMS, &serde_json::to_string(&lines).unwrap())
            .unwrap();

        let state = SessionPersistence::new(storage).hydrate();
        assert_eq!(state.cart.cart_items, vec![line("a", 10)]);
    }

    #[test]
    fn write_failures_are_swallowed() {
        let persistence = SessionPersistence::new(FailingStorage);
        persistence.persist_changes(&SessionState::default(), &populated());
        assert_eq!(persistence.hydrate(), SessionState::default());
    }
}
