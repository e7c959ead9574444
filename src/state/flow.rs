//! Submit/guard state machine shared by the log-in, sign-up and log-out pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page owns one `AuthFlow`. The page renders from `Gate` and the last
//! `RequestOutcome`; the flow decides when a reply may touch the `AuthStore`.
//!
//! ORDERING
//! ========
//! Every submission takes the next attempt number before its request goes
//! out. A reply is applied only if its attempt is still the latest one issued,
//! so the most recently issued request decides the outcome even when replies
//! arrive out of order. Older replies are reported as `Settlement::Stale`.
//!
//! A page that unmounts calls `detach`. Replies arriving afterwards still
//! update the store on success but are reported as `Settlement::Detached` so
//! the page neither navigates nor writes to its disposed signals.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::auth::{AuthState, AuthStore};
use crate::config::Endpoint;
use crate::net::api::AuthApi;
use crate::net::types::{Credentials, TransportError};
use crate::router::ROOT_PATH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    LogIn,
    SignUp,
    LogOut,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint().path())
    }
}

/// Whether a flow page may show its form for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Open,
    AlreadyLoggedIn,
    AlreadyLoggedOut,
}

impl Gate {
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Open => None,
            Self::AlreadyLoggedIn => Some("User is already logged in"),
            Self::AlreadyLoggedOut => Some("User is already logged out"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User-correctable input problem, shown next to the field.
    Validation,
    Authentication,
    Server,
    /// The request never completed.
    Transport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Username,
    Password,
}

/// Non-success result of a flow submission. `Display` is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Password does not meet the requirements")]
    InvalidPassword,
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("Incorrect username or password")]
    BadCredentials,
    #[error("Unable to logout")]
    LogoutFailed,
    #[error("Something went wrong, please try again")]
    Server,
    #[error("Something went wrong, please try again")]
    UnexpectedStatus(u16),
    #[error("Something went wrong, please try again")]
    Transport(#[source] TransportError),
}

impl FlowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPassword | Self::UsernameTaken => ErrorCategory::Validation,
            Self::BadCredentials => ErrorCategory::Authentication,
            Self::LogoutFailed | Self::Server | Self::UnexpectedStatus(_) => ErrorCategory::Server,
            Self::Transport(_) => ErrorCategory::Transport,
        }
    }

    /// Field the message belongs next to; `None` means the form-level bar.
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::UsernameTaken => Some(FormField::Username),
            Self::InvalidPassword => Some(FormField::Password),
            _ => None,
        }
    }
}

impl FlowKind {
    pub fn endpoint(self) -> Endpoint {
        match self {
            Self::LogIn => Endpoint::LogIn,
            Self::SignUp => Endpoint::SignUp,
            Self::LogOut => Endpoint::LogOut,
        }
    }

    /// State the store moves to after a successful reply.
    pub fn success_state(self) -> AuthState {
        match self {
            Self::LogIn | Self::SignUp => AuthState::LoggedIn,
            Self::LogOut => AuthState::LoggedOut,
        }
    }

    /// `autocomplete` hint for the password input. Sign-up asks password
    /// managers for a fresh password instead of offering a saved one.
    pub fn password_autocomplete(self) -> &'static str {
        match self {
            Self::SignUp => "new-password",
            Self::LogIn | Self::LogOut => "current-password",
        }
    }

    /// `Loading` never closes the gate: the form is shown until the session
    /// check says otherwise.
    pub fn gate(self, state: AuthState) -> Gate {
        match (self, state) {
            (Self::LogIn | Self::SignUp, AuthState::LoggedIn) => Gate::AlreadyLoggedIn,
            (Self::LogOut, AuthState::LoggedOut) => Gate::AlreadyLoggedOut,
            _ => Gate::Open,
        }
    }

    /// Map a reply to this flow's result.
    ///
    /// # Errors
    ///
    /// Returns the [`FlowError`] to show inline for any non-200 reply.
    pub fn interpret(self, reply: &Result<u16, TransportError>) -> Result<(), FlowError> {
        let status = match reply {
            Ok(status) => *status,
            Err(e) => return Err(FlowError::Transport(e.clone())),
        };
        match (self, status) {
            (_, 200) => Ok(()),
            (Self::LogIn, 401) => Err(FlowError::BadCredentials),
            (Self::SignUp, 400) => Err(FlowError::InvalidPassword),
            (Self::SignUp, 409) => Err(FlowError::UsernameTaken),
            (Self::LogOut, 500) => Err(FlowError::LogoutFailed),
            (Self::LogIn | Self::SignUp, 500) => Err(FlowError::Server),
            (_, other) => Err(FlowError::UnexpectedStatus(other)),
        }
    }
}

/// Sequence number captured before a request is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attempt(u64);

impl Attempt {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// The settled result of the latest attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub attempt: Attempt,
    /// `None` when no response arrived.
    pub status: Option<u16>,
    pub result: Result<(), FlowError>,
}

impl RequestOutcome {
    /// Where the page should navigate, if anywhere.
    pub fn navigate_to(&self) -> Option<&'static str> {
        self.result.is_ok().then_some(ROOT_PATH)
    }

    /// Inline message for the given slot (`None` = form-level bar).
    pub fn message_for(&self, field: Option<FormField>) -> Option<String> {
        match &self.result {
            Err(e) if e.field() == field => Some(e.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting { attempt: Attempt },
    Settled(RequestOutcome),
}

/// What became of a reply (or a submission that never left).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The gate was closed; no request was issued.
    Blocked(Gate),
    Applied(RequestOutcome),
    /// A newer attempt was issued after this one; the reply was dropped.
    Stale { attempt: Attempt, latest: Attempt },
    /// Latest reply for a page that has unmounted.
    Detached(RequestOutcome),
}

#[derive(Debug)]
struct FlowInner {
    issued: u64,
    settled: u32,
    phase: Phase,
    attached: bool,
}

/// Per-page flow handle. Clones share the same state.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    kind: FlowKind,
    inner: Arc<Mutex<FlowInner>>,
}

impl AuthFlow {
    pub fn new(kind: FlowKind) -> Self {
        Self {
            kind,
            inner: Arc::new(Mutex::new(FlowInner { issued: 0, settled: 0, phase: Phase::Idle, attached: true })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase.clone()
    }

    /// Number of replies applied to this page so far.
    pub fn settled_attempts(&self) -> u32 {
        self.lock().settled
    }

    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// Mark the owning page as unmounted.
    pub fn detach(&self) {
        self.lock().attached = false;
    }

    /// Take the next attempt number and enter `Submitting`.
    pub fn begin(&self) -> Attempt {
        let mut inner = self.lock();
        inner.issued += 1;
        let attempt = Attempt(inner.issued);
        inner.phase = Phase::Submitting { attempt };
        attempt
    }

    /// Apply a reply if `attempt` is still the latest one issued.
    pub fn settle(&self, attempt: Attempt, reply: Result<u16, TransportError>, store: &AuthStore) -> Settlement {
        let (outcome, attached) = {
            let mut inner = self.lock();
            let latest = Attempt(inner.issued);
            if attempt != latest {
                log::debug!("{}: dropping stale reply for attempt {} (latest {})", self.kind, attempt.0, latest.0);
                return Settlement::Stale { attempt, latest };
            }
            let outcome = RequestOutcome {
                attempt,
                status: reply.as_ref().ok().copied(),
                result: self.kind.interpret(&reply),
            };
            if inner.attached {
                inner.phase = Phase::Settled(outcome.clone());
                inner.settled += 1;
            }
            (outcome, inner.attached)
        };

        match &outcome.result {
            Ok(()) => store.set(self.kind.success_state()),
            Err(e) => log::debug!("{}: attempt {} failed: {e:?}", self.kind, attempt.0),
        }

        if attached { Settlement::Applied(outcome) } else { Settlement::Detached(outcome) }
    }

    /// Guard, issue, await, and settle one submission.
    ///
    /// `credentials` is the request body; log-out sends none.
    pub async fn submit<A>(&self, api: &A, store: &AuthStore, credentials: Option<&Credentials>) -> Settlement
    where
        A: AuthApi + ?Sized,
    {
        let gate = self.kind.gate(store.get());
        if gate != Gate::Open {
            log::debug!("{}: submission blocked ({gate:?})", self.kind);
            return Settlement::Blocked(gate);
        }
        let attempt = self.begin();
        log::debug!("{}: issuing attempt {}", self.kind, attempt.0);
        let reply = api.send(self.kind.endpoint(), credentials).await;
        self.settle(attempt, reply, store)
    }
}
