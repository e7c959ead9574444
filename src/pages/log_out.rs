//! Log-out confirmation page.

use leptos::prelude::*;

use super::auth_form::{FlowGate, info_text, use_auth_flow};
use crate::state::flow::FlowKind;

#[component]
pub fn LogOutPage() -> impl IntoView {
    let flow = use_auth_flow(FlowKind::LogOut);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        flow.submit.run(None);
    };

    view! {
        <FlowGate kind=FlowKind::LogOut>
            <div class="auth-page">
                <form class="auth-form" on:submit=on_submit>
                    <h2>"Logout from Patras"</h2>
                    <div class="auth-info-bar">{info_text(flow.outcome, None)}</div>
                    <input class="auth-submit" type="submit" value="Log Out"/>
                </form>
            </div>
        </FlowGate>
    }
}
