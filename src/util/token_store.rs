//! Bearer token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token lives in a single `jwt` cookie shared by the whole page. Session
//! checks and the request pipeline read it through the `TokenStore` trait so
//! tests can swap in `MemoryTokenStore`.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{REMEMBER_DAYS, TOKEN_COOKIE_KEY};

/// Storage for the opaque bearer token.
///
/// Methods take `&self` because the backing medium is page-global. Last
/// writer wins.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    /// Persist `token`. Remembered tokens outlive the browser session.
    fn set(&self, token: &str, remember: bool);
    /// Delete the token. Safe to call when nothing is stored.
    fn remove(&self);
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str, remember: bool) {
        (**self).set(token, remember);
    }

    fn remove(&self) {
        (**self).remove();
    }
}

/// Token store backed by `document.cookie`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieTokenStore;

impl TokenStore for CookieTokenStore {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let cookies = html_document()?.cookie().ok()?;
            read_cookie(&cookies, TOKEN_COOKIE_KEY)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn set(&self, token: &str, remember: bool) {
        write_cookie(&set_cookie_string(TOKEN_COOKIE_KEY, token, remember));
    }

    fn remove(&self) {
        write_cookie(&remove_cookie_string(TOKEN_COOKIE_KEY));
    }
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

fn write_cookie(assignment: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(doc) = html_document() else {
            leptos::logging::warn!("cookie write skipped: no document");
            return;
        };
        if let Err(e) = doc.set_cookie(assignment) {
            leptos::logging::warn!("cookie write failed: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = assignment;
    }
}

/// In-memory token store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<StoredToken>>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct StoredToken {
    value: String,
    remember: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a remembered token.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token, true);
        store
    }

    /// Whether the stored token was written with remember-me.
    pub fn is_remembered(&self) -> Option<bool> {
        self.slot().as_ref().map(|t| t.remember)
    }

    fn slot(&self) -> MutexGuard<'_, Option<StoredToken>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot().as_ref().map(|t| t.value.clone())
    }

    fn set(&self, token: &str, remember: bool) {
        *self.slot() = Some(StoredToken { value: token.to_owned(), remember });
    }

    fn remove(&self) {
        self.slot().take();
    }
}

/// Cookie assignment storing `value` under `key`.
pub(crate) fn set_cookie_string(key: &str, value: &str, remember: bool) -> String {
    let mut cookie = format!("{key}={}; path=/; secure; samesite=strict", encode_cookie_value(value));
    if remember {
        let max_age = u64::from(REMEMBER_DAYS) * 24 * 60 * 60;
        cookie.push_str(&format!("; max-age={max_age}"));
    }
    cookie
}

/// Cookie assignment that expires `key` immediately.
pub(crate) fn remove_cookie_string(key: &str) -> String {
    format!("{key}=; path=/; secure; samesite=strict; max-age=0")
}

/// Find `key` in a `document.cookie` string and decode its value.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn read_cookie(cookies: &str, key: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| decode_cookie_value(value))
        .filter(|value| !value.is_empty())
}

fn encode_cookie_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '%' | ';' | ',' | ' ' | '"' | '\\' => out.push_str(&format!("%{:02X}", u32::from(ch))),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn decode_cookie_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
