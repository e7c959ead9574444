//! Ordered route table mapping a pathname to the page that renders it.
//!
//! `leptos_router` only supplies the current location and history; the page
//! choice is made here, first match wins. Auth gating is left to the pages.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

pub const ROOT_PATH: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Landing,
    LogIn,
    SignUp,
    LogOut,
    NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(&'static str),
    Wildcard,
}

impl RoutePattern {
    pub fn matches(self, path: &str) -> bool {
        match self {
            Self::Exact(literal) => literal == path,
            Self::Wildcard => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub pattern: RoutePattern,
    pub page: Page,
}

impl Route {
    pub const fn exact(path: &'static str, page: Page) -> Self {
        Self { pattern: RoutePattern::Exact(path), page }
    }

    pub const fn fallback(page: Page) -> Self {
        Self { pattern: RoutePattern::Wildcard, page }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route table must end with a wildcard route")]
    MissingFallback,
    #[error("wildcard route at position {0} shadows the routes after it")]
    ShadowingWildcard(usize),
}

/// Immutable, validated route table. Always ends with exactly one wildcard,
/// so every path resolves to exactly one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: vec![
                Route::exact(ROOT_PATH, Page::Landing),
                Route::exact("/log-in", Page::LogIn),
                Route::exact("/sign-up", Page::SignUp),
                Route::exact("/log-out", Page::LogOut),
                Route::fallback(Page::NotFound),
            ],
        }
    }
}

impl RouteTable {
    /// # Errors
    ///
    /// Returns [`RouteTableError`] unless the only wildcard is the last route.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let last = routes.len().checked_sub(1).ok_or(RouteTableError::MissingFallback)?;
        if let Some(pos) = routes.iter().position(|r| r.pattern == RoutePattern::Wildcard) {
            if pos != last {
                return Err(RouteTableError::ShadowingWildcard(pos));
            }
        } else {
            return Err(RouteTableError::MissingFallback);
        }
        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Page {
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .map_or(Page::NotFound, |route| route.page)
    }
}
