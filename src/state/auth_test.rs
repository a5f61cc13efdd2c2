use super::*;
use crate::testing::{RecordingNavigator, token};
use crate::util::clock::FixedClock;
use crate::util::token_store::MemoryTokenStore;

const NOW: f64 = 1_700_000_000.0;

fn evaluator(store: &MemoryTokenStore) -> SessionEvaluator<MemoryTokenStore, FixedClock> {
    SessionEvaluator::with_clock(store.clone(), FixedClock(NOW))
}

// =============================================================
// AuthState phases
// =============================================================

#[test]
fn auth_state_default_is_checking() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.loading);
    assert_eq!(state.phase(), GuardPhase::Checking);
}

#[test]
fn redirecting_has_no_user() {
    assert_eq!(AuthState::redirecting().phase(), GuardPhase::Redirecting);
}

#[test]
fn authorized_carries_user() {
    let session = crate::state::session::decode_token(&token(NOW + 1.0, "user")).unwrap();
    let state = AuthState::authorized(session.clone());
    assert_eq!(state.phase(), GuardPhase::Authorized);
    assert_eq!(state.user, Some(session));
}

// =============================================================
// resolve_guard
// =============================================================

#[test]
fn no_token_redirects_once_to_login() {
    let store = MemoryTokenStore::new();
    let nav = RecordingNavigator::default();
    let state = resolve_guard(&evaluator(&store), &nav, None);
    assert_eq!(state.phase(), GuardPhase::Redirecting);
    assert_eq!(nav.visits(), vec!["/login".to_owned()]);
}

#[test]
fn expired_token_is_cleared_and_redirected() {
    let store = MemoryTokenStore::with_token(&token(NOW - 1.0, "user"));
    let nav = RecordingNavigator::default();
    let state = resolve_guard(&evaluator(&store), &nav, None);
    assert_eq!(state, AuthState::redirecting());
    assert!(store.get().is_none());
    assert_eq!(nav.visits().len(), 1);
}

#[test]
fn malformed_token_is_cleared_and_redirected() {
    let store = MemoryTokenStore::with_token("garbage");
    let nav = RecordingNavigator::default();
    resolve_guard(&evaluator(&store), &nav, None);
    assert!(store.get().is_none());
    assert_eq!(nav.visits().len(), 1);
}

#[test]
fn role_mismatch_discards_valid_session() {
    let store = MemoryTokenStore::with_token(&token(NOW + 3600.0, "user"));
    let nav = RecordingNavigator::default();
    let state = resolve_guard(&evaluator(&store), &nav, Some("admin"));
    assert_eq!(state.phase(), GuardPhase::Redirecting);
    assert!(store.get().is_none());
    assert_eq!(nav.visits(), vec!["/login".to_owned()]);
}

#[test]
fn valid_matching_session_is_authorized_without_side_effects() {
    let t = token(NOW + 3600.0, "admin");
    let store = MemoryTokenStore::with_token(&t);
    let nav = RecordingNavigator::default();
    let state = resolve_guard(&evaluator(&store), &nav, Some("admin"));
    assert_eq!(state.phase(), GuardPhase::Authorized);
    assert_eq!(state.user.map(|u| u.role).as_deref(), Some("admin"));
    assert_eq!(store.get(), Some(t));
    assert!(nav.visits().is_empty());
}
