//! Auth-session state for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! `RequireAuth` owns one `AuthState` per mount. It starts in `Checking`, and
//! `resolve_guard` moves it to `Authorized` or `Redirecting` exactly once.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::LOGIN_PATH;
use crate::state::session::{Access, DecodedSession, SessionEvaluator};
use crate::util::clock::Clock;
use crate::util::navigation::Navigator;
use crate::util::token_store::TokenStore;

/// The current user's decoded session and whether the check is still pending.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<DecodedSession>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::checking()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardPhase {
    /// Session not yet evaluated; show the loading placeholder.
    Checking,
    /// Navigation to login in flight; render nothing.
    Redirecting,
    /// Render the protected view.
    Authorized,
}

impl AuthState {
    pub fn checking() -> Self {
        Self { user: None, loading: true }
    }

    pub fn redirecting() -> Self {
        Self { user: None, loading: false }
    }

    pub fn authorized(user: DecodedSession) -> Self {
        Self { user: Some(user), loading: false }
    }

    pub fn phase(&self) -> GuardPhase {
        match (self.loading, &self.user) {
            (true, _) => GuardPhase::Checking,
            (false, None) => GuardPhase::Redirecting,
            (false, Some(_)) => GuardPhase::Authorized,
        }
    }
}

/// Evaluate the stored session for a view requiring `role`.
///
/// On any denial (no token, undecodable, expired, wrong role) the token is
/// cleared and a hard redirect to `/login` is issued before returning.
pub fn resolve_guard<S, C, N>(evaluator: &SessionEvaluator<S, C>, navigator: &N, role: Option<&str>) -> AuthState
where
    S: TokenStore,
    C: Clock,
    N: Navigator + ?Sized,
{
    match evaluator.check(role) {
        Access::Granted(session) => AuthState::authorized(session),
        Access::Denied(reason) => {
            leptos::logging::log!("session rejected: {reason:?}");
            evaluator.store().remove();
            navigator.hard_redirect(LOGIN_PATH);
            AuthState::redirecting()
        }
    }
}
