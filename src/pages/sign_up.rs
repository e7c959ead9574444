//! Sign-up page. Validation replies are shown next to the field they concern.

use leptos::prelude::*;

use super::auth_form::{CredentialsForm, FlowGate, use_auth_flow};
use crate::state::flow::FlowKind;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let flow = use_auth_flow(FlowKind::SignUp);

    view! {
        <FlowGate kind=FlowKind::SignUp>
            <CredentialsForm
                title="Create a patras account"
                subtitle="Complete the form below to create your account"
                submit_label="Sign Up"
                flow=flow
                field_messages=true
            />
        </FlowGate>
    }
}
