//! One-shot startup session check.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell spawns `SessionBootstrapper::run` once on mount. Until it
//! resolves, every view sees `AuthState::Loading`.
//!
//! ERROR HANDLING
//! ==============
//! Fail-closed: anything other than a confirmed 200, including a request that
//! never completed, resolves to `LoggedOut` so the UI never stays `Loading`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::auth::{AuthState, AuthStore};
use crate::config::Endpoint;
use crate::net::api::AuthApi;
use crate::net::types::TransportError;

/// Map a check-login reply to the state it implies.
pub fn resolve_check_login(reply: &Result<u16, TransportError>) -> AuthState {
    match reply {
        Ok(200) => AuthState::LoggedIn,
        Ok(401) => AuthState::LoggedOut,
        Ok(status) => {
            log::warn!("check-login: unexpected status {status}, treating as logged out");
            AuthState::LoggedOut
        }
        Err(e) => {
            log::warn!("check-login: {e}, treating as logged out");
            AuthState::LoggedOut
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionBootstrapper {
    store: AuthStore,
    started: Arc<AtomicBool>,
}

impl SessionBootstrapper {
    pub fn new(store: AuthStore) -> Self {
        Self { store, started: Arc::new(AtomicBool::new(false)) }
    }

    /// Ask the server whether the current session is valid and seed the store.
    ///
    /// Only the first call issues a request; later calls return the current
    /// state untouched. If an auth flow resolved the state while the check was
    /// in flight, its result wins.
    pub async fn run<A>(&self, api: &A) -> AuthState
    where
        A: AuthApi + ?Sized,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.store.get();
        }
        let reply = api.send(Endpoint::CheckLogin, None).await;
        let resolved = resolve_check_login(&reply);
        self.store.seed(resolved);
        self.store.get()
    }
}
