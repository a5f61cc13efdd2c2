//! Test doubles shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::net::api::ApiError;
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::util::navigation::Navigator;

/// Transport replaying scripted responses in order and recording requests.
#[derive(Default)]
pub struct FakeTransport {
    pub responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    pub sent: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        let fake = Self::default();
        fake.push(status, body);
        fake
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_owned() }));
    }
}

impl Transport for &FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Navigator that records every hard redirect.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_redirect(&self, path: &str) {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_owned());
    }
}

/// Unsigned token carrying `claims` as its payload.
pub fn token_with(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Token for subject `u1` issued at `exp - 3600`.
pub fn token(exp: f64, role: &str) -> String {
    token_with(&serde_json::json!({ "sub": "u1", "iat": exp - 3600.0, "exp": exp, "role": role }))
}
