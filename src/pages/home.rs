//! Protected landing page showing the signed-in session.

use leptos::prelude::*;

use crate::components::user_badge::UserBadge;
use crate::state::auth::AuthState;

/// Must be rendered inside `RequireAuth`, which provides the auth context.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let subject = move || auth.with(|s| s.user.as_ref().map(|u| u.sub.clone()).unwrap_or_default());
    let role = move || auth.with(|s| s.user.as_ref().map(|u| u.role.clone()).unwrap_or_default());

    let on_sign_out = move |_| {
        use crate::util::navigation::{BrowserNavigator, Navigator as _};

        crate::net::auth::AuthService::browser().logout();
        BrowserNavigator.hard_redirect(crate::config::LOGIN_PATH);
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                {move || view! { <UserBadge name=subject()/> }}
                <div class="home-page__identity">
                    <span class="home-page__subject">{subject}</span>
                    <span class="home-page__role">{role}</span>
                </div>
                <button class="btn" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
        </div>
    }
}
