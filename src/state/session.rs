//! Decoded bearer-token session and validity checks.
//!
//! DESIGN
//! ======
//! The token is decoded, never verified: the signature segment is ignored and
//! trust rests with the service that issued it. Every ambiguity (missing
//! token, undecodable payload, expiry at the current second) resolves to
//! "not authenticated".

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::util::clock::{Clock, SystemClock};
use crate::util::token_store::TokenStore;

/// Claims carried in the token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedSession {
    /// Subject (user identifier).
    pub sub: String,
    /// Issued-at, seconds since epoch. May be fractional.
    pub iat: f64,
    /// Expires-at, seconds since epoch. May be fractional.
    pub exp: f64,
    pub role: String,
}

impl DecodedSession {
    /// Expired when `exp` is at or before `now`.
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.exp <= now
    }

    /// Exact, case-sensitive role match. An absent or empty required role
    /// matches anything.
    pub fn has_role(&self, required: Option<&str>) -> bool {
        required.filter(|role| !role.is_empty()).is_none_or(|role| self.role == role)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a valid claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decode the claims of a dot-separated signed token without verifying it.
///
/// # Errors
///
/// Returns `DecodeError` if the payload segment is missing, not base64url, or
/// not a JSON claims object.
pub fn decode_token(token: &str) -> Result<DecodedSession, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(DecodeError::MissingPayload)?;
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Why a protected view refused the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NoSession,
    Expired,
    RoleMismatch { required: String, actual: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Access {
    Granted(DecodedSession),
    Denied(DenyReason),
}

/// Judges the stored token: present, unexpired, role-matching.
#[derive(Clone, Debug)]
pub struct SessionEvaluator<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: TokenStore> SessionEvaluator<S> {
    pub fn new(store: S) -> Self {
        Self { store, clock: SystemClock }
    }
}

impl<S: TokenStore, C: Clock> SessionEvaluator<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decoded claims of the stored token, or `None` when there is no token
    /// or it cannot be decoded. Decode failures are logged, never raised.
    pub fn decoded_session(&self) -> Option<DecodedSession> {
        let token = self.store.get()?;
        match decode_token(&token) {
            Ok(session) => Some(session),
            Err(e) => {
                leptos::logging::error!("failed to decode token: {e}");
                None
            }
        }
    }

    /// True unless a decodable token with `exp` in the future is stored.
    pub fn is_expired(&self) -> bool {
        let now = self.clock.now_secs();
        self.decoded_session().is_none_or(|s| s.is_expired_at(now))
    }

    /// Full access decision for a view requiring `required_role`.
    pub fn check(&self, required_role: Option<&str>) -> Access {
        let Some(session) = self.decoded_session() else {
            return Access::Denied(DenyReason::NoSession);
        };
        if session.is_expired_at(self.clock.now_secs()) {
            return Access::Denied(DenyReason::Expired);
        }
        if !session.has_role(required_role) {
            return Access::Denied(DenyReason::RoleMismatch {
                required: required_role.unwrap_or_default().to_owned(),
                actual: session.role,
            });
        }
        Access::Granted(session)
    }
}
