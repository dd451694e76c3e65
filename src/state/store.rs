// ============================================================================
// SESSION STORE - contenedor único de la sesión (Rc<RefCell>) + suscriptores
// ============================================================================
// No es global: se crea al arrancar y se pasa explícitamente a los viewmodels.
// Cada dispatch se aplica completo antes del siguiente (un solo hilo) y el
// borrow del estado se libera antes de notificar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::SessionPersistence;
use crate::state::{reduce, Action, SessionState};
use crate::utils::KeyValueStore;

type Subscriber = Rc<dyn Fn(&SessionState)>;

pub struct SessionStore<S: KeyValueStore> {
    state: Rc<RefCell<SessionState>>,
    persistence: Rc<SessionPersistence<S>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<S: KeyValueStore> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            persistence: self.persistence.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Crea el store hidratado desde `storage`
    pub fn hydrate(storage: S) -> Self {
        let persistence = SessionPersistence::new(storage);
        let state = persistence.hydrate();
        Self::with_state(state, persistence)
    }

    fn with_state(state: SessionState, persistence: SessionPersistence<S>) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            persistence: Rc::new(persistence),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Copia del estado actual
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Lectura sin clonar
    pub fn read<R>(&self, reader: impl FnOnce(&SessionState) -> R) -> R {
        reader(&*self.state.borrow())
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Aplica la acción, persiste los fragmentos cambiados y notifica
    pub fn dispatch(&self, action: Action) {
        let name = action.name();
        let (prev, next) = {
            let mut state = self.state.borrow_mut();
            let prev = state.clone();
            *state = reduce(prev.clone(), action);
            (prev, state.clone())
        };

        if prev == next {
            log::debug!("[STORE] {} sin cambios", name);
            return;
        }
        log::debug!("[STORE] {} aplicado", name);

        self.persistence.persist_changes(&prev, &next);
        self.notify(&next);
    }

    pub fn toggle_dark_mode(&self) {
        let action = if self.read(|s| s.dark_mode) {
            Action::DarkModeOff
        } else {
            Action::DarkModeOn
        };
        self.dispatch(action);
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self, state: &SessionState) {
        // Copia de la lista: un suscriptor puede suscribir a otros
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(state);
        }
    }
}
