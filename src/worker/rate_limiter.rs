//! Per-connection rate limiting

use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Rate limiter using a token bucket via the governor crate.
///
/// Pacing is per connection slot, not global: every worker carries its own
/// limiter, so with C connections and limit L the aggregate throughput is
/// bounded by C x L, not by L alone. The burst size is pinned to 1 so two
/// successive sends on the same slot are always at least `1000 / L`
/// milliseconds apart.
pub struct RequestRateLimiter {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    rate_limit: Option<f64>,
}

impl RequestRateLimiter {
    /// Create a new rate limiter.
    ///
    /// `rate_limit` is requests per second for one slot; `None` or a
    /// non-positive value disables pacing entirely.
    pub fn new(rate_limit: Option<f64>) -> Self {
        let limiter = rate_limit.and_then(|rps| {
            if rps <= 0.0 {
                return None;
            }
            // Sub-1 RPS values round up to 1 RPS.
            let rps_int = (rps.ceil() as u32).max(1);
            let quota = Quota::per_second(NonZeroU32::new(rps_int)?).allow_burst(NonZeroU32::new(1)?);
            Some(RateLimiter::direct(quota))
        });

        Self {
            limiter,
            rate_limit,
        }
    }

    /// Create an unlimited rate limiter (no pacing).
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Wait until the next send is allowed.
    ///
    /// Returns immediately when no rate limit is configured; otherwise
    /// only the calling worker suspends.
    pub async fn wait(&self) {
        if let Some(ref limiter) = self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Try to acquire a permit without waiting.
    pub fn try_acquire(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }

    /// Check if rate limiting is enabled.
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Get the configured rate limit (requests per second).
    pub fn rate_limit(&self) -> Option<f64> {
        self.rate_limit
    }
}

impl Default for RequestRateLimiter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for RequestRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestRateLimiter")
            .field("rate_limit", &self.rate_limit)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_rate_limiter_disabled() {
        let limiter = RequestRateLimiter::new(None);
        assert!(!limiter.is_enabled());
        assert!(limiter.rate_limit().is_none());
        assert!(limiter.try_acquire());
    }

    #[test]
    fn test_rate_limiter_zero_rps() {
        let limiter = RequestRateLimiter::new(Some(0.0));
        assert!(!limiter.is_enabled());
    }

    #[test]
    fn test_rate_limiter_negative_rps() {
        let limiter = RequestRateLimiter::new(Some(-10.0));
        assert!(!limiter.is_enabled());
    }

    #[test]
    fn test_rate_limiter_enabled() {
        let limiter = RequestRateLimiter::new(Some(100.0));
        assert!(limiter.is_enabled());
        assert_eq!(limiter.rate_limit(), Some(100.0));
    }

    #[test]
    fn test_rate_limiter_unlimited() {
        let limiter = RequestRateLimiter::unlimited();
        assert!(!limiter.is_enabled());
    }

    #[tokio::test]
    async fn test_rate_limiter_wait_disabled() {
        let limiter = RequestRateLimiter::new(None);
        // Should return immediately.
        limiter.wait().await;
    }

    #[tokio::test]
    async fn test_rate_limiter_first_acquire_immediate() {
        let limiter = RequestRateLimiter::new(Some(1.0));
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limiter_paces_successive_sends() {
        // 20 rps => at least 50ms between two sends on one slot.
        let limiter = RequestRateLimiter::new(Some(20.0));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(45));
    }

    #[test]
    fn test_rate_limiter_debug() {
        let limiter = RequestRateLimiter::new(Some(100.0));
        let debug = format!("{:?}", limiter);
        assert!(debug.contains("RequestRateLimiter"));
        assert!(debug.contains("100.0"));
        assert!(debug.contains("true"));
    }
}
