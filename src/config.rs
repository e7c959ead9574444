//! API location parsed from build-time environment variables.
//!
//! The WASM bundle has no process environment, so the base is baked in with
//! `option_env!` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PATRAS_API_BASE is empty")]
    EmptyBase,
    #[error("PATRAS_API_BASE must be a root-relative path or http(s) URL, got '{0}'")]
    InvalidBase(String),
}

/// Remote auth endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CheckLogin,
    LogIn,
    SignUp,
    LogOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::CheckLogin => "check-login",
            Self::LogIn => "log-in",
            Self::SignUp => "sign-up",
            Self::LogOut => "log-out",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::CheckLogin => Method::Get,
            Self::LogIn | Self::SignUp | Self::LogOut => Method::Post,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base: DEFAULT_API_BASE.to_owned() }
    }
}

impl ApiConfig {
    /// Build config from `PATRAS_API_BASE` as seen at compile time.
    ///
    /// Optional:
    /// - `PATRAS_API_BASE`: default `/api`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the variable is set to an unusable value.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::with_base(option_env!("PATRAS_API_BASE"))
    }

    /// Build config from an optional raw base value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `raw` is empty or not a path/URL.
    pub fn with_base(raw: Option<&str>) -> Result<Self, ConfigError> {
        let base = parse_base(raw.unwrap_or(DEFAULT_API_BASE))?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base, endpoint.path())
    }
}

fn parse_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBase);
    }
    let invalid = || ConfigError::InvalidBase(trimmed.to_owned());
    if let Some(rest) = trimmed.strip_prefix("http://").or_else(|| trimmed.strip_prefix("https://")) {
        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() {
            return Err(invalid());
        }
    } else if !trimmed.starts_with('/') || trimmed.starts_with("//") {
        // "//host" is protocol-relative and would leave the origin.
        return Err(invalid());
    }
    // "/" alone trims to "", which yields "/check-login" style URLs.
    Ok(trimmed.trim_end_matches('/').to_owned())
}
