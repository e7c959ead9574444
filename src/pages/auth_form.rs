//! Shared plumbing for the log-in, sign-up and log-out pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `use_auth_flow` binds one `AuthFlow` to the page's lifetime: submissions
//! run on `spawn_local`, applied outcomes land in a page signal, and a
//! navigation effect follows successful ones. Unmounting detaches the flow so
//! late replies never write to disposed signals.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::HttpAuthApi;
use crate::net::types::Credentials;
use crate::state::auth::{AuthState, AuthStore};
#[cfg(feature = "csr")]
use crate::state::flow::Settlement;
use crate::state::flow::{AuthFlow, FlowKind, FormField, Gate, RequestOutcome};

/// Page-side handles for one flow.
#[derive(Clone, Copy)]
pub(crate) struct FlowHandles {
    pub kind: FlowKind,
    pub submit: Callback<Option<Credentials>>,
    pub outcome: RwSignal<Option<RequestOutcome>>,
}

pub(crate) fn use_auth_flow(kind: FlowKind) -> FlowHandles {
    let store = expect_context::<AuthStore>();
    let api = expect_context::<HttpAuthApi>();
    let navigate = use_navigate();

    let flow = AuthFlow::new(kind);
    let outcome = RwSignal::new(None::<RequestOutcome>);

    let detach = flow.clone();
    on_cleanup(move || detach.detach());

    Effect::new(move || {
        if let Some(path) = outcome.get().and_then(|o| o.navigate_to()) {
            navigate(path, NavigateOptions::default());
        }
    });

    let submit = Callback::new(move |credentials: Option<Credentials>| {
        spawn_submission(flow.clone(), store.clone(), api.clone(), credentials, outcome);
    });

    FlowHandles { kind, submit, outcome }
}

fn spawn_submission(
    flow: AuthFlow,
    store: AuthStore,
    api: HttpAuthApi,
    credentials: Option<Credentials>,
    outcome: RwSignal<Option<RequestOutcome>>,
) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Settlement::Applied(applied) = flow.submit(&api, &store, credentials.as_ref()).await {
            outcome.set(Some(applied));
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (flow, store, api, credentials, outcome);
    }
}

/// Reactive text for one info bar slot.
pub(crate) fn info_text(
    outcome: RwSignal<Option<RequestOutcome>>,
    field: Option<FormField>,
) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || outcome.get().and_then(|o| o.message_for(field)).unwrap_or_default()
}

/// Static notice shown instead of the form when the gate is closed.
#[component]
pub(crate) fn GateNotice(kind: FlowKind) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    view! {
        <div class="gate-notice">
            <h1>{move || kind.gate(auth.get()).notice().unwrap_or_default()}</h1>
        </div>
    }
}

/// Renders `children` only while the flow's gate is open.
#[component]
pub(crate) fn FlowGate(kind: FlowKind, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    view! {
        <Show
            when=move || kind.gate(auth.get()) == Gate::Open
            fallback=move || view! { <GateNotice kind=kind/> }
        >
            {children()}
        </Show>
    }
}

/// Username/password form shared by log-in and sign-up.
///
/// Field values survive a failed attempt so the form can be resubmitted.
#[component]
pub(crate) fn CredentialsForm(
    title: &'static str,
    subtitle: &'static str,
    submit_label: &'static str,
    flow: FlowHandles,
    /// Show per-field info bars (sign-up) in addition to the form-level one.
    #[prop(optional)]
    field_messages: bool,
) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let outcome = flow.outcome;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        flow.submit.run(Some(Credentials::new(username.get_untracked(), password.get_untracked())));
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h2>{title}</h2>
                <p>{subtitle}</p>

                <div class="auth-label-row">
                    <label class="auth-label" for="username-input">"Username:"</label>
                </div>
                <input
                    id="username-input"
                    class="auth-input"
                    name="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                {field_messages
                    .then(|| {
                        view! {
                            <div class="auth-info-bar">{info_text(outcome, Some(FormField::Username))}</div>
                        }
                    })}

                <div class="auth-label-row">
                    <label class="auth-label" for="password-input">"Password:"</label>
                    <input
                        class="auth-show-password"
                        type="checkbox"
                        tabindex="-1"
                        prop:checked=move || show_password.get()
                        on:change=move |_| show_password.update(|shown| *shown = !*shown)
                    />
                    <span class="auth-show-password-label">"Show"</span>
                </div>
                <input
                    id="password-input"
                    class="auth-input"
                    name="password"
                    type=move || if show_password.get() { "text" } else { "password" }
                    autocomplete=flow.kind.password_autocomplete()
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {field_messages
                    .then(|| {
                        view! {
                            <div class="auth-info-bar">{info_text(outcome, Some(FormField::Password))}</div>
                        }
                    })}

                <div class="auth-info-bar">{info_text(outcome, None)}</div>
                <input class="auth-submit" type="submit" value=submit_label/>
            </form>
        </div>
    }
}
