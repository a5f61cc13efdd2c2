//! Circular avatar with the user's initials.

use leptos::prelude::*;

use crate::util::avatar::{initials, name_to_color};

#[component]
pub fn UserBadge(name: String) -> impl IntoView {
    let style = format!("background-color: {}", name_to_color(&name));
    let label = initials(&name);

    view! {
        <span class="user-badge" style=style title=name>
            {label}
        </span>
    }
}
