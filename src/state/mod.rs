//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` holds the pure token judgement; `auth` layers the per-mount guard
//! state machine on top of it.

pub mod auth;
pub mod session;
