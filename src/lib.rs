//! # authgate
//!
//! Leptos + WASM client-side session handling: a cookie-backed bearer token,
//! unverified decode and expiry checks, an HTTP pipeline that attaches the
//! token and reacts to 401s, and a guard component for protected routes.
//!
//! Trust rests entirely with the service that issued the token; nothing here
//! verifies signatures or refreshes sessions.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

/// Browser entry point: install panic/log hooks and hydrate the SSR body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
