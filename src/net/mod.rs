//! Networking modules for the auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `api` wraps it in the bearer/401 pipeline,
//! `auth` uses the pipeline for login, and `types` defines the wire schema.

pub mod api;
pub mod auth;
pub mod transport;
pub mod types;
