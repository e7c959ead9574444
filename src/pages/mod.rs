//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `router::RouteTable` picks one page per location. The three auth pages
//! share their submit/guard plumbing through `auth_form`.

pub(crate) mod auth_form;
pub mod landing;
pub mod log_in;
pub mod log_out;
pub mod not_found;
pub mod sign_up;
