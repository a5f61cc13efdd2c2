//! Loading placeholder shown while a session check is pending.

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="auth-loading" aria-label="Loading">
            <div class="auth-loading__spinner"></div>
        </div>
    }
}
