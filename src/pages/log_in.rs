//! Log-in page: username/password form posting to `log-in`.

use leptos::prelude::*;

use super::auth_form::{CredentialsForm, FlowGate, use_auth_flow};
use crate::state::flow::FlowKind;

#[component]
pub fn LogInPage() -> impl IntoView {
    let flow = use_auth_flow(FlowKind::LogIn);

    view! {
        <FlowGate kind=FlowKind::LogIn>
            <CredentialsForm
                title="Login to Patras"
                subtitle="Complete the form below to login"
                submit_label="Log In"
                flow=flow
            />
        </FlowGate>
    }
}
