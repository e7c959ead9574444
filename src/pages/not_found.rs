//! Catch-all page for paths outside the route table.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <span class="not-found-page__title-big">"Error 404"</span>
            <span class="not-found-page__title-small">"Page Not Found"</span>
        </div>
    }
}
