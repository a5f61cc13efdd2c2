//! Login/logout against the remote auth service.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::api::{ApiClient, ApiError, BrowserApiClient};
use super::transport::{GlooTransport, Transport};
use super::types::{ApiResponse, LoginRequest, LoginResponse};
use crate::config::LOGIN_ENDPOINT;
use crate::state::session::{DecodedSession, SessionEvaluator};
use crate::util::navigation::{BrowserNavigator, Navigator};
use crate::util::token_store::{CookieTokenStore, TokenStore};

pub struct AuthService<T, S, N> {
    api: ApiClient<T, S, N>,
}

impl AuthService<GlooTransport, CookieTokenStore, BrowserNavigator> {
    pub fn browser() -> Self {
        Self::new(BrowserApiClient::browser())
    }
}

impl<T, S, N> AuthService<T, S, N>
where
    T: Transport,
    S: TokenStore,
    N: Navigator,
{
    pub fn new(api: ApiClient<T, S, N>) -> Self {
        Self { api }
    }

    /// `POST /auth/login`; on a successful envelope carrying a non-empty token
    /// the token is stored (persistently when `remember`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request itself fails. A rejected login
    /// with a well-formed error envelope is `Ok(ApiResponse::Failure(..))`.
    pub async fn login(&self, username: &str, password: &str, remember: bool) -> Result<ApiResponse<LoginResponse>, ApiError> {
        let body = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let response: ApiResponse<LoginResponse> = self.api.post(LOGIN_ENDPOINT, &body).await?;
        if let Some(login) = response.data().filter(|d| !d.token.is_empty()) {
            self.api.store().set(&login.token, remember);
        }
        Ok(response)
    }

    pub fn logout(&self) {
        self.api.store().remove();
    }

    pub fn token(&self) -> Option<String> {
        self.api.store().get()
    }

    pub fn decoded_session(&self) -> Option<DecodedSession> {
        SessionEvaluator::new(self.api.store()).decoded_session()
    }

    pub fn is_expired(&self) -> bool {
        SessionEvaluator::new(self.api.store()).is_expired()
    }
}
