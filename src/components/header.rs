//! Site header with auth-dependent navigation links.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the shared `RwSignal<AuthState>` only; it never performs network I/O.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;

use crate::router::ROOT_PATH;
use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const LOGGED_OUT_LINKS: &[NavLink] = &[
    NavLink { href: "/log-in", label: "Log In" },
    NavLink { href: "/sign-up", label: "Sign Up" },
];

const LOGGED_IN_LINKS: &[NavLink] = &[NavLink { href: "/log-out", label: "Log Out" }];

/// Links to show for `state`. Nothing is shown until the session check
/// resolves.
pub fn header_links(state: AuthState) -> &'static [NavLink] {
    match state {
        AuthState::Loading => &[],
        AuthState::LoggedOut => LOGGED_OUT_LINKS,
        AuthState::LoggedIn => LOGGED_IN_LINKS,
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="site-header">
            <a class="site-header__title" href=ROOT_PATH>
                <span class="site-header__title-large">"Pa"</span>
                <span class="site-header__title-small">"per"</span>
                <span class="site-header__title-large">"Tra"</span>
                <span class="site-header__title-small">"der"</span>
                <span class="site-header__title-large">"S"</span>
                <span class="site-header__title-small">"olo"</span>
            </a>
            <nav class="site-header__links">
                {move || {
                    header_links(auth.get())
                        .iter()
                        .map(|link| {
                            view! {
                                <span class="site-header__link-container">
                                    <a href=link.href>
                                        <span class="site-header__link-text">{link.label}</span>
                                    </a>
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </header>
    }
}
