//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (cookies, clock, location) from
//! session and page logic so the latter stay testable off-browser.

pub mod avatar;
pub mod clock;
pub mod navigation;
pub mod token_store;
