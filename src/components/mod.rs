//! Reusable UI components.

pub mod auth_guard;
pub mod spinner;
pub mod user_badge;
