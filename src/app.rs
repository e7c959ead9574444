//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::Router;
use leptos_router::hooks::use_location;

use crate::components::header::Header;
use crate::config::{ApiConfig, DEFAULT_API_BASE};
use crate::net::api::HttpAuthApi;
use crate::pages::{
    landing::LandingPage, log_in::LogInPage, log_out::LogOutPage, not_found::NotFoundPage, sign_up::SignUpPage,
};
use crate::router::{Page, RouteTable};
use crate::state::auth::AuthStore;
use crate::state::session::SessionBootstrapper;

/// Root application component.
///
/// Creates the auth store, mirrors it into a signal for rendering, provides
/// shared contexts, and starts the one-time session check.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("{e}; using {DEFAULT_API_BASE}");
        ApiConfig::default()
    });
    let api = HttpAuthApi::new(config);

    let store = AuthStore::new();
    let auth = RwSignal::new(store.get());
    // Lives as long as the page, so the subscription is never removed.
    let _bridge = store.subscribe(move |state| auth.set(state));

    provide_context(store.clone());
    provide_context(auth);
    provide_context(api.clone());
    provide_context(RouteTable::default());

    let bootstrapper = SessionBootstrapper::new(store);
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let state = bootstrapper.run(&api).await;
        log::info!("session check resolved: {state}");
    });
    #[cfg(not(feature = "csr"))]
    let _ = (bootstrapper, api);

    view! {
        <Title text="Patras"/>
        <Router>
            <div id="app">
                <Header/>
                <main>
                    <RoutedPage/>
                </main>
            </div>
        </Router>
    }
}

/// Renders the single page the route table selects for the current path.
#[component]
fn RoutedPage() -> impl IntoView {
    let routes = expect_context::<RouteTable>();
    let location = use_location();
    let page = Memo::new(move |_| routes.resolve(&location.pathname.get()));

    move || match page.get() {
        Page::Landing => view! { <LandingPage/> }.into_any(),
        Page::LogIn => view! { <LogInPage/> }.into_any(),
        Page::SignUp => view! { <SignUpPage/> }.into_any(),
        Page::LogOut => view! { <LogOutPage/> }.into_any(),
        Page::NotFound => view! { <NotFoundPage/> }.into_any(),
    }
}
