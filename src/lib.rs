//! # patras-client
//!
//! Leptos + WASM frontend for the Patras paper trading service.
//!
//! The crate tracks whether the user is logged in, logged out, or still
//! being checked, and gates navigation links and page content on that state.
//! `state` holds the framework-free state machine (store, startup session
//! check, per-page submit flow); `pages` and `components` are thin Leptos
//! bindings over it. Build with `--features csr` for the browser; native
//! builds keep the network inert so the state machine is testable on the host.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
