//! Session guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route views wrap themselves in `RequireAuth` (or `with_auth`) to get the
//! same login redirect behavior. The session is checked once per mount in a
//! post-render effect; effects never run during SSR, so server output and the
//! first client paint both show the spinner.

#[cfg(test)]
#[path = "auth_guard_test.rs"]
mod auth_guard_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::spinner::LoadingSpinner;
use crate::state::auth::{AuthState, GuardPhase, resolve_guard};
use crate::state::session::SessionEvaluator;
use crate::util::clock::Clock;
use crate::util::navigation::{BrowserNavigator, Navigator};
use crate::util::token_store::{CookieTokenStore, TokenStore};

/// What the guard renders for a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    Spinner,
    Nothing,
    Protected,
}

pub fn guard_view(phase: GuardPhase) -> GuardView {
    match phase {
        GuardPhase::Checking => GuardView::Spinner,
        GuardPhase::Redirecting => GuardView::Nothing,
        GuardPhase::Authorized => GuardView::Protected,
    }
}

/// The session decision `RequireAuth` runs on mount.
///
/// Provide one as context to swap the token store, clock or navigator;
/// without it the guard reads the `jwt` cookie and navigates the window.
#[derive(Clone)]
pub struct SessionCheck(Arc<dyn Fn(Option<&str>) -> AuthState + Send + Sync>);

impl SessionCheck {
    pub fn new<S, C, N>(evaluator: SessionEvaluator<S, C>, navigator: N) -> Self
    where
        S: TokenStore + Send + Sync + 'static,
        C: Clock + Send + Sync + 'static,
        N: Navigator + Send + Sync + 'static,
    {
        Self(Arc::new(move |role: Option<&str>| resolve_guard(&evaluator, &navigator, role)))
    }

    pub fn browser() -> Self {
        Self::new(SessionEvaluator::new(CookieTokenStore), BrowserNavigator)
    }

    /// The check provided by an ancestor, or the browser default.
    pub fn from_context() -> Self {
        use_context::<Self>().unwrap_or_else(Self::browser)
    }

    pub fn run(&self, role: Option<&str>) -> AuthState {
        (self.0)(role)
    }
}

/// Per-mount guard state shared by the mount effect and the render closure.
#[derive(Clone)]
pub struct MountGuard {
    auth: RwSignal<AuthState>,
    check: SessionCheck,
    role: Option<String>,
}

impl MountGuard {
    pub fn new(check: SessionCheck, role: Option<String>) -> Self {
        Self { auth: RwSignal::new(AuthState::checking()), check, role }
    }

    pub fn auth(&self) -> RwSignal<AuthState> {
        self.auth
    }

    /// Resolve the session. Only the first call does anything.
    pub fn check_once(&self) {
        if !self.auth.with_untracked(|s| s.loading) {
            return;
        }
        self.auth.set(self.check.run(self.role.as_deref()));
    }

    /// Build exactly one of the three outputs for the current phase.
    pub fn render<V>(
        &self,
        spinner: impl FnOnce() -> V,
        nothing: impl FnOnce() -> V,
        protected: impl FnOnce() -> V,
    ) -> V {
        match guard_view(self.auth.with(AuthState::phase)) {
            GuardView::Spinner => spinner(),
            GuardView::Nothing => nothing(),
            GuardView::Protected => protected(),
        }
    }
}

/// Render `children` only for a valid, unexpired session holding `role`.
///
/// Provides `RwSignal<AuthState>` as context so children can read the
/// decoded session.
#[component]
pub fn RequireAuth(#[prop(optional_no_strip)] role: Option<String>, children: ChildrenFn) -> impl IntoView {
    let guard = MountGuard::new(SessionCheck::from_context(), role);
    provide_context(guard.auth());

    let on_mount = guard.clone();
    Effect::new(move || on_mount.check_once());

    move || {
        guard.render(
            || view! { <LoadingSpinner/> }.into_any(),
            || ().into_any(),
            || children().into_any(),
        )
    }
}

/// Wrap a route view so it renders behind `RequireAuth`.
///
/// ```ignore
/// <Route path=StaticSegment("admin") view=with_auth(AdminPage, Some("admin"))/>
/// ```
pub fn with_auth<F, V>(view: F, role: Option<&'static str>) -> impl Fn() -> AnyView + Clone + Send + Sync + 'static
where
    F: Fn() -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || {
        let view = view.clone();
        view! { <RequireAuth role=role.map(str::to_owned)>{view()}</RequireAuth> }.into_any()
    }
}
