//! Public landing page.

use leptos::prelude::*;

const PROJECT_URL: &str = "https://github.com/4lineclear/patras";
const CITY_URL: &str = "https://en.wikipedia.org/wiki/Patras";

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <p>"PaTraS is a hyper minimalist paper trading service"</p>
            <p>
                "This site doesn't procure its own data. Instead, the user must set up "
                "their own mechanism for getting data."
            </p>
            <p>"Here are the ways data can be inputted:"</p>
            <ul>
                <li>"Manual Input"</li>
                <li>"Automated Input"</li>
            </ul>
            <p>
                "This service is named after "
                <a target="_blank" href=CITY_URL>"Patras"</a>
                ", a Greek city dubbed \"Gate to the West\""
            </p>
            <p>"See the " <a target="_blank" href=PROJECT_URL>"Github"</a> "."</p>
        </div>
    }
}
