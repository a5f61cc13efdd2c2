//! Wall-clock source for expiry checks.

/// Seconds since the Unix epoch, fractional.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// The real clock: `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        #[cfg(feature = "hydrate")]
        {
            js_sys::Date::now() / 1000.0
        }
        #[cfg(not(feature = "hydrate"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0.0, |d| d.as_secs_f64())
        }
    }
}

/// A clock pinned to one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}
