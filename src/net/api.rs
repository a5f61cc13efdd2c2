//! Request pipeline: bearer injection on the way out, payload unwrapping and
//! session invalidation on the way back.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` composes two plain hooks around a `Transport` call:
//! `authorize` (pre) attaches `Authorization: Bearer <token>` when a token is
//! stored, and `intercept` (post) turns the raw response into the caller's
//! payload. A 401 from any request clears the token and hard-redirects to
//! `/login` before the error is handed back to the caller.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries. Failures other than 401 reach the caller unchanged.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::transport::{GlooTransport, HttpRequest, HttpResponse, Method, Transport};
use super::types::{ApiErrorBody, ApiResponse};
use crate::config::ClientConfig;
use crate::util::navigation::{BrowserNavigator, Navigator};
use crate::util::token_store::{CookieTokenStore, TokenStore};

pub const UNAUTHORIZED: u16 = 401;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed: {status}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failure, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `{code, message}` of an error envelope carried in a non-2xx body.
    pub fn envelope_error(&self) -> Option<ApiErrorBody> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(body).ok()? {
            ApiResponse::Failure(error) => Some(error),
            ApiResponse::Success(_) => None,
        }
    }
}

/// The client used by browser code: gloo-net, cookie token, hard navigation.
pub type BrowserApiClient = ApiClient<GlooTransport, CookieTokenStore, BrowserNavigator>;

#[derive(Clone, Debug)]
pub struct ApiClient<T, S, N> {
    config: ClientConfig,
    transport: T,
    store: S,
    navigator: N,
}

impl BrowserApiClient {
    pub fn browser() -> Self {
        Self::new(ClientConfig::from_build_env(), GlooTransport, CookieTokenStore, BrowserNavigator)
    }
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport,
    S: TokenStore,
    N: Navigator,
{
    pub fn new(config: ClientConfig, transport: T, store: S, navigator: N) -> Self {
        Self { config, transport, store, navigator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pre-send hook: attach the stored token as a bearer credential.
    pub fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.store.get() {
            request.headers.retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
            request.headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        request
    }

    /// Post-receive hook: unwrap a 2xx body into `R`, invalidate the session
    /// on 401, pass every other failure through.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, `ApiError::Unauthorized` for a
    /// 401, `ApiError::Status` for other non-2xx statuses, or
    /// `ApiError::Decode` when a 2xx body is not valid `R`.
    pub fn intercept<R: DeserializeOwned>(&self, result: Result<HttpResponse, ApiError>) -> Result<R, ApiError> {
        let response = result?;
        if response.status == UNAUTHORIZED {
            leptos::logging::warn!("401 received; clearing session");
            self.store.remove();
            self.navigator.hard_redirect(&self.config.login_path);
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, body: response.body });
        }
        let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
        serde_json::from_str(body).map_err(ApiError::Decode)
    }

    /// Send `method path` with an optional JSON body through both hooks.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::intercept`]; also `ApiError::Encode` when `body`
    /// cannot be serialized.
    pub async fn request<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = HttpRequest::new(method, self.config.resolve_url(path));
        if let Some(body) = body {
            request.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        }
        let request = self.authorize(request);
        let result = self.transport.send(request).await;
        self.intercept(result)
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request::<(), R>(Method::Get, path, None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Post, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Put, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Patch, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request::<(), R>(Method::Delete, path, None).await
    }
}
