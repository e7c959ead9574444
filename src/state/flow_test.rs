use futures::executor::block_on;

use super::*;
use crate::testing::{GatedApi, ScriptedApi};

fn creds() -> Credentials {
    Credentials::new("alice", "correct horse")
}

fn logged_out_store() -> AuthStore {
    let store = AuthStore::new();
    store.seed(AuthState::LoggedOut);
    store
}

fn logged_in_store() -> AuthStore {
    let store = AuthStore::new();
    store.seed(AuthState::LoggedIn);
    store
}

fn applied(settlement: Settlement) -> RequestOutcome {
    match settlement {
        Settlement::Applied(outcome) => outcome,
        other => panic!("expected Applied, got {other:?}"),
    }
}

// =============================================================
// Status interpretation
// =============================================================

#[test]
fn log_in_interpretation() {
    assert_eq!(FlowKind::LogIn.interpret(&Ok(200)), Ok(()));
    assert_eq!(FlowKind::LogIn.interpret(&Ok(401)), Err(FlowError::BadCredentials));
    assert_eq!(FlowKind::LogIn.interpret(&Ok(500)), Err(FlowError::Server));
    assert_eq!(FlowKind::LogIn.interpret(&Ok(418)), Err(FlowError::UnexpectedStatus(418)));
}

#[test]
fn sign_up_interpretation() {
    assert_eq!(FlowKind::SignUp.interpret(&Ok(200)), Ok(()));
    assert_eq!(FlowKind::SignUp.interpret(&Ok(400)), Err(FlowError::InvalidPassword));
    assert_eq!(FlowKind::SignUp.interpret(&Ok(409)), Err(FlowError::UsernameTaken));
    assert_eq!(FlowKind::SignUp.interpret(&Ok(500)), Err(FlowError::Server));
}

#[test]
fn log_out_interpretation() {
    assert_eq!(FlowKind::LogOut.interpret(&Ok(200)), Ok(()));
    assert_eq!(FlowKind::LogOut.interpret(&Ok(500)), Err(FlowError::LogoutFailed));
    assert_eq!(FlowKind::LogOut.interpret(&Ok(401)), Err(FlowError::UnexpectedStatus(401)));
}

#[test]
fn transport_failure_is_generic_error() {
    let err = FlowKind::LogIn.interpret(&Err(TransportError::Request("offline".to_owned()))).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.to_string(), "Something went wrong, please try again");
}

#[test]
fn error_categories_and_fields() {
    assert_eq!(FlowError::UsernameTaken.category(), ErrorCategory::Validation);
    assert_eq!(FlowError::UsernameTaken.field(), Some(FormField::Username));
    assert_eq!(FlowError::InvalidPassword.field(), Some(FormField::Password));
    assert_eq!(FlowError::BadCredentials.category(), ErrorCategory::Authentication);
    assert_eq!(FlowError::BadCredentials.field(), None);
    assert_eq!(FlowError::Server.category(), ErrorCategory::Server);
    assert_eq!(FlowError::LogoutFailed.to_string(), "Unable to logout");
}

// =============================================================
// Gate
// =============================================================

#[test]
fn gate_for_each_state() {
    assert_eq!(FlowKind::LogIn.gate(AuthState::LoggedIn), Gate::AlreadyLoggedIn);
    assert_eq!(FlowKind::SignUp.gate(AuthState::LoggedIn), Gate::AlreadyLoggedIn);
    assert_eq!(FlowKind::LogIn.gate(AuthState::LoggedOut), Gate::Open);
    assert_eq!(FlowKind::LogOut.gate(AuthState::LoggedOut), Gate::AlreadyLoggedOut);
    assert_eq!(FlowKind::LogOut.gate(AuthState::LoggedIn), Gate::Open);
}

#[test]
fn sign_up_requests_new_password_autocomplete() {
    assert_eq!(FlowKind::SignUp.password_autocomplete(), "new-password");
    assert_eq!(FlowKind::LogIn.password_autocomplete(), "current-password");
}

#[test]
fn gate_is_open_while_loading() {
    for kind in [FlowKind::LogIn, FlowKind::SignUp, FlowKind::LogOut] {
        assert_eq!(kind.gate(AuthState::Loading), Gate::Open);
    }
}

#[test]
fn gate_notices() {
    assert_eq!(Gate::Open.notice(), None);
    assert_eq!(Gate::AlreadyLoggedIn.notice(), Some("User is already logged in"));
    assert_eq!(Gate::AlreadyLoggedOut.notice(), Some("User is already logged out"));
}

// =============================================================
// Submission
// =============================================================

#[test]
fn log_in_200_logs_in_and_navigates_home() {
    let store = logged_out_store();
    let api = ScriptedApi::status(200);
    let flow = AuthFlow::new(FlowKind::LogIn);

    let outcome = applied(block_on(flow.submit(&api, &store, Some(&creds()))));

    assert_eq!(store.get(), AuthState::LoggedIn);
    assert_eq!(outcome.navigate_to(), Some("/"));
    assert_eq!(outcome.status, Some(200));
    assert_eq!(api.calls(), vec![(Endpoint::LogIn, Some(creds()))]);
}

#[test]
fn log_in_401_keeps_state_and_shows_credentials_error() {
    let store = logged_out_store();
    let flow = AuthFlow::new(FlowKind::LogIn);

    let outcome = applied(block_on(flow.submit(&ScriptedApi::status(401), &store, Some(&creds()))));

    assert_eq!(store.get(), AuthState::LoggedOut);
    assert_eq!(outcome.navigate_to(), None);
    assert_eq!(outcome.message_for(None).as_deref(), Some("Incorrect username or password"));
    assert_eq!(flow.phase(), Phase::Settled(outcome));
}

#[test]
fn log_in_while_loading_submits_optimistically() {
    let store = AuthStore::new();
    let api = ScriptedApi::status(200);
    let flow = AuthFlow::new(FlowKind::LogIn);

    applied(block_on(flow.submit(&api, &store, Some(&creds()))));

    assert_eq!(api.calls().len(), 1);
    assert_eq!(store.get(), AuthState::LoggedIn);
}

#[test]
fn sign_up_409_and_400_stay_resubmittable() {
    let store = logged_out_store();
    let api = ScriptedApi::new([Ok(409), Ok(400), Ok(200)]);
    let flow = AuthFlow::new(FlowKind::SignUp);

    let taken = applied(block_on(flow.submit(&api, &store, Some(&creds()))));
    assert_eq!(store.get(), AuthState::LoggedOut);
    assert_eq!(taken.message_for(Some(FormField::Username)).as_deref(), Some("Username is already taken"));
    assert_eq!(taken.message_for(Some(FormField::Password)), None);

    let weak = applied(block_on(flow.submit(&api, &store, Some(&creds()))));
    assert_eq!(store.get(), AuthState::LoggedOut);
    assert_eq!(
        weak.message_for(Some(FormField::Password)).as_deref(),
        Some("Password does not meet the requirements")
    );

    let ok = applied(block_on(flow.submit(&api, &store, Some(&creds()))));
    assert_eq!(ok.attempt.seq(), 3);
    assert_eq!(store.get(), AuthState::LoggedIn);
    assert_eq!(flow.settled_attempts(), 3);
}

#[test]
fn sign_up_blocked_when_logged_in() {
    let store = logged_in_store();
    let api = ScriptedApi::status(200);
    let flow = AuthFlow::new(FlowKind::SignUp);

    assert_eq!(
        block_on(flow.submit(&api, &store, Some(&creds()))),
        Settlement::Blocked(Gate::AlreadyLoggedIn)
    );
    assert!(api.calls().is_empty());
}

#[test]
fn log_out_when_logged_out_issues_no_request() {
    let store = logged_out_store();
    let api = ScriptedApi::status(200);
    let flow = AuthFlow::new(FlowKind::LogOut);

    assert_eq!(block_on(flow.submit(&api, &store, None)), Settlement::Blocked(Gate::AlreadyLoggedOut));
    assert!(api.calls().is_empty());
    assert_eq!(flow.phase(), Phase::Idle);
}

#[test]
fn log_out_200_logs_out_and_navigates_home() {
    let store = logged_in_store();
    let api = ScriptedApi::status(200);
    let flow = AuthFlow::new(FlowKind::LogOut);

    let outcome = applied(block_on(flow.submit(&api, &store, None)));

    assert_eq!(store.get(), AuthState::LoggedOut);
    assert_eq!(outcome.navigate_to(), Some("/"));
    assert_eq!(api.calls(), vec![(Endpoint::LogOut, None)]);
}

#[test]
fn log_out_500_shows_unable_to_logout() {
    let store = logged_in_store();
    let flow = AuthFlow::new(FlowKind::LogOut);

    let outcome = applied(block_on(flow.submit(&ScriptedApi::status(500), &store, None)));

    assert_eq!(store.get(), AuthState::LoggedIn);
    assert_eq!(outcome.message_for(None).as_deref(), Some("Unable to logout"));
}

#[test]
fn transport_failure_settles_instead_of_hanging() {
    let store = logged_out_store();
    let api = ScriptedApi::new([Err(TransportError::Request("offline".to_owned()))]);
    let flow = AuthFlow::new(FlowKind::LogIn);

    let outcome = applied(block_on(flow.submit(&api, &store, Some(&creds()))));

    assert_eq!(outcome.status, None);
    assert!(matches!(flow.phase(), Phase::Settled(_)));
    assert_eq!(store.get(), AuthState::LoggedOut);
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn begin_enters_submitting_with_increasing_attempts() {
    let flow = AuthFlow::new(FlowKind::LogIn);
    assert_eq!(flow.phase(), Phase::Idle);
    let first = flow.begin();
    let second = flow.begin();
    assert!(second > first);
    assert_eq!(flow.phase(), Phase::Submitting { attempt: second });
}

#[test]
fn later_issued_reply_wins_when_it_arrives_first() {
    let store = logged_out_store();
    let flow = AuthFlow::new(FlowKind::LogIn);
    let first = flow.begin();
    let second = flow.begin();

    let newer = flow.settle(second, Ok(200), &store);
    let older = flow.settle(first, Ok(401), &store);

    assert!(matches!(newer, Settlement::Applied(_)));
    assert_eq!(older, Settlement::Stale { attempt: first, latest: second });
    assert_eq!(store.get(), AuthState::LoggedIn);
    match flow.phase() {
        Phase::Settled(outcome) => assert_eq!(outcome.attempt, second),
        other => panic!("expected Settled, got {other:?}"),
    }
}

#[test]
fn earlier_reply_arriving_first_is_dropped_until_latest_lands() {
    let store = logged_out_store();
    let flow = AuthFlow::new(FlowKind::LogIn);
    let first = flow.begin();
    let second = flow.begin();

    assert!(matches!(flow.settle(first, Ok(200), &store), Settlement::Stale { .. }));
    assert_eq!(store.get(), AuthState::LoggedOut);
    assert_eq!(flow.phase(), Phase::Submitting { attempt: second });

    let outcome = applied(flow.settle(second, Ok(401), &store));
    assert_eq!(outcome.result, Err(FlowError::BadCredentials));
    assert_eq!(store.get(), AuthState::LoggedOut);
}

#[test]
fn overlapping_submissions_resolve_to_latest_issued() {
    let store = logged_out_store();
    let flow = AuthFlow::new(FlowKind::LogIn);
    let (api, replies) = GatedApi::new(2);
    let mut replies = replies.into_iter();
    let (Some(first_reply), Some(second_reply)) = (replies.next(), replies.next()) else {
        panic!("expected two reply senders");
    };
    let form = creds();

    let (first, second, ()) = block_on(async {
        futures::join!(
            flow.submit(&api, &store, Some(&form)),
            flow.submit(&api, &store, Some(&form)),
            async {
                let _ = second_reply.send(Ok(200));
                futures::pending!();
                let _ = first_reply.send(Ok(401));
            }
        )
    });

    assert!(matches!(first, Settlement::Stale { .. }));
    let outcome = applied(second);
    assert_eq!(outcome.attempt.seq(), 2);
    assert_eq!(store.get(), AuthState::LoggedIn);
}

// =============================================================
// Detached pages
// =============================================================

#[test]
fn detached_success_updates_store_without_touching_page() {
    let store = logged_out_store();
    let flow = AuthFlow::new(FlowKind::LogIn);
    let attempt = flow.begin();
    flow.detach();

    let settlement = flow.settle(attempt, Ok(200), &store);

    assert!(matches!(settlement, Settlement::Detached(_)));
    assert!(!flow.is_attached());
    assert_eq!(store.get(), AuthState::LoggedIn);
    assert_eq!(flow.phase(), Phase::Submitting { attempt });
    assert_eq!(flow.settled_attempts(), 0);
}

#[test]
fn detached_failure_is_noop() {
    let store = logged_in_store();
    let flow = AuthFlow::new(FlowKind::LogOut);
    let attempt = flow.begin();
    flow.detach();

    let settlement = flow.settle(attempt, Ok(500), &store);

    assert!(matches!(settlement, Settlement::Detached(ref o) if o.result.is_err()));
    assert_eq!(store.get(), AuthState::LoggedIn);
}
