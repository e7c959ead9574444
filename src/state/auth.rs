//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is created once by the app shell and injected into the header,
//! the session bootstrapper, and every auth flow page. It is the only shared
//! mutable value in the client.
//!
//! DESIGN
//! ======
//! `set` notifies listeners synchronously in registration order. The Leptos
//! `RwSignal<AuthState>` used for rendering is just one of those listeners, so
//! the state machine stays testable without a reactive runtime.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Whether the client believes the user holds a valid session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The startup session check has not resolved yet.
    #[default]
    Loading,
    LoggedIn,
    LoggedOut,
}

impl AuthState {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::LoggedIn => "logged-in",
            Self::LoggedOut => "logged-out",
        })
    }
}

type Listener = Arc<dyn Fn(AuthState) + Send + Sync>;

struct StoreInner {
    state: AuthState,
    next_listener_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl StoreInner {
    fn snapshot_listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, listener)| Arc::clone(listener)).collect()
    }
}

/// Shared handle to the process-wide [`AuthState`].
///
/// Clones point at the same state. Reads and subscriptions are public; writes
/// are crate-private and go through [`AuthStore::set`] (auth flows) or
/// [`AuthStore::seed`] (session bootstrap).
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("AuthStore")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state: AuthState::Loading,
                next_listener_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state. `Loading` until the session check resolves.
    pub fn get(&self) -> AuthState {
        self.lock().state
    }

    /// Register a listener that runs on every [`AuthStore::set`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(AuthState) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription { store: Arc::downgrade(&self.inner), id }
    }

    /// The single mutator. Notifies every current listener in registration
    /// order before returning.
    ///
    /// The state never re-enters `Loading` once it has resolved; such a
    /// request is dropped.
    pub(crate) fn set(&self, next: AuthState) {
        self.transition(next, false);
    }

    /// Resolve the startup `Loading` state. Returns `false` without touching
    /// the state when an auth flow already resolved it.
    pub(crate) fn seed(&self, resolved: AuthState) -> bool {
        self.transition(resolved, true)
    }

    /// Check and write under one lock, then notify with the lock released so
    /// listeners may read or subscribe re-entrantly.
    fn transition(&self, next: AuthState, only_from_loading: bool) -> bool {
        let listeners = {
            let mut inner = self.lock();
            let prev = inner.state;
            if only_from_loading && prev.is_resolved() {
                log::debug!("auth state: bootstrap result {next} arrived after resolution, ignored");
                return false;
            }
            if prev.is_resolved() && next == AuthState::Loading {
                log::warn!("auth state: ignoring transition {prev} -> {next}");
                return false;
            }
            inner.state = next;
            log::debug!("auth state: {prev} -> {next}");
            inner.snapshot_listeners()
        };
        for listener in listeners {
            listener(next);
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Handle returned by [`AuthStore::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    store: Weak<Mutex<StoreInner>>,
    id: u64,
}

impl Subscription {
    /// Remove the listener. No-op if the store has already been dropped.
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            let mut inner = store.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
