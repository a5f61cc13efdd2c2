//! Full-page navigation.
//!
//! Auth failures leave the app through a hard redirect so no authenticated UI
//! survives in memory. Router-level soft navigation is deliberately not used
//! here.

use std::sync::Arc;

/// Performs hard (document-reloading) navigation.
pub trait Navigator {
    fn hard_redirect(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn hard_redirect(&self, path: &str) {
        (**self).hard_redirect(path);
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn hard_redirect(&self, path: &str) {
        (**self).hard_redirect(path);
    }
}

/// Navigator that assigns `window.location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn hard_redirect(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_href(path) {
                leptos::logging::warn!("redirect to {path} failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}
