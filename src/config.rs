//! Client configuration resolved at build time.
//!
//! The browser has no process environment, so the API base URL is baked in
//! from `API_BASE_URL` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api/v1";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Cookie key holding the bearer token.
pub const TOKEN_COOKIE_KEY: &str = "jwt";
/// Lifetime of a remembered token cookie.
pub const REMEMBER_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub home_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_base_url(None)
    }
}

impl ClientConfig {
    /// Build config from the compile-time environment.
    ///
    /// Optional:
    /// - `API_BASE_URL`: default `/api/v1`
    pub fn from_build_env() -> Self {
        Self::from_base_url(option_env!("API_BASE_URL"))
    }

    /// Build config from an explicit base URL, falling back to the default
    /// when it is absent or blank.
    pub fn from_base_url(raw: Option<&str>) -> Self {
        let api_base_url = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self { api_base_url, login_path: LOGIN_PATH.to_owned(), home_path: HOME_PATH.to_owned() }
    }

    /// Resolve a request path against the base URL.
    ///
    /// Absolute `http(s)://` URLs are returned untouched.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
