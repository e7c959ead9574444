//! Client-side auth state.
//!
//! DESIGN
//! ======
//! `auth` holds the shared tri-state store, `session` seeds it once at
//! startup, and `flow` is the per-page submit/guard machine that updates it
//! on definitive server replies.

pub mod auth;
pub mod flow;
pub mod session;
