//! Networking for the auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the transport seam and its browser implementation, and
//! `types` defines the request body and transport error.

pub mod api;
pub mod types;
