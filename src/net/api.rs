//! REST transport for the auth endpoints.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: `HttpAuthApi` reports `TransportError::Unavailable`, which
//! the session check treats like any other failure (fail-closed).
//!
//! ERROR HANDLING
//! ==============
//! Only transport failures are errors here. Any HTTP response, including 4xx
//! and 5xx, is returned as its status code and interpreted by the caller.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{Credentials, TransportError};
use crate::config::{ApiConfig, Endpoint};

/// Seam between the auth state machine and the network.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Issue one request and report the response status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received.
    async fn send(&self, endpoint: Endpoint, credentials: Option<&Credentials>) -> Result<u16, TransportError>;
}

/// Browser `fetch` implementation. Session cookies ride along with the
/// same-origin default.
#[derive(Debug, Clone, Default)]
pub struct HttpAuthApi {
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn send(&self, endpoint: Endpoint, credentials: Option<&Credentials>) -> Result<u16, TransportError> {
        #[cfg(feature = "csr")]
        {
            use crate::config::Method;
            use gloo_net::http::Request;

            let url = self.config.url(endpoint);
            let request = match (endpoint.method(), credentials) {
                (Method::Get, _) => Request::get(&url).build(),
                (Method::Post, Some(creds)) => Request::post(&url).json(creds),
                (Method::Post, None) => Request::post(&url)
                    .header("Content-Type", "application/json")
                    .build(),
            }
            .map_err(|e| TransportError::Request(e.to_string()))?;
            let resp = request
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;
            Ok(resp.status())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (endpoint, credentials);
            Err(TransportError::Unavailable)
        }
    }
}
