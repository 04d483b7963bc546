//! Proportional throttle driven by Etsy's per-second quota header.
//!
//! After each successful response the dispatcher asks the [`RateLimiter`]
//! how long to pause, based on `x-remaining-this-second`. The pause grows
//! linearly as the remaining quota drops below a threshold:
//!
//! ```text
//! delay = max(0, threshold - remaining) * step
//! ```
//!
//! With the defaults (threshold 8, step 100ms) a response reporting 0 calls
//! left costs 800ms; anything at or above 8 costs nothing.

use std::time::Duration;

use crate::clients::http_response::HttpResponse;

/// Remaining-call count assumed when the header is absent.
pub const DEFAULT_REMAINING: u32 = 10;

/// Remaining-call count at or above which no delay is applied.
pub const DEFAULT_THRESHOLD: u32 = 8;

/// Delay added per call below the threshold.
pub const DEFAULT_STEP: Duration = Duration::from_millis(100);

/// Computes throttle delays from response headers.
///
/// The limiter holds no mutable state; it is a pure function of the last
/// response.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use etsy_api::clients::RateLimiter;
///
/// let limiter = RateLimiter::default();
/// assert_eq!(limiter.delay_for(10), Duration::ZERO);
/// assert_eq!(limiter.delay_for(8), Duration::ZERO);
/// assert_eq!(limiter.delay_for(5), Duration::from_millis(300));
/// assert_eq!(limiter.delay_for(0), Duration::from_millis(800));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimiter {
    threshold: u32,
    step: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_STEP)
    }
}

impl RateLimiter {
    /// Creates a limiter with a custom threshold and per-call step.
    #[must_use]
    pub const fn new(threshold: u32, step: Duration) -> Self {
        Self { threshold, step }
    }

    /// Creates a limiter that never delays.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Returns the delay for a given remaining-call count.
    #[must_use]
    pub fn delay_for(&self, remaining: u32) -> Duration {
        self.step * self.threshold.saturating_sub(remaining)
    }

    /// Returns the delay implied by a response's quota headers.
    #[must_use]
    pub fn delay_after(&self, response: &HttpResponse) -> Duration {
        let remaining = response
            .rate_limit
            .remaining_this_second
            .unwrap_or(DEFAULT_REMAINING);
        self.delay_for(remaining)
    }

    /// Sleeps for the delay implied by `response`, if any.
    pub async fn throttle(&self, response: &HttpResponse) {
        let delay = self.delay_after(response);
        tracing::trace!(
            remaining = ?response.rate_limit.remaining_this_second,
            remaining_today = ?response.rate_limit.remaining_today,
            "Etsy rate limit headers"
        );
        if !delay.is_zero() {
            tracing::debug!(?delay, "Throttling before next Etsy request");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response_with_remaining(remaining: Option<&str>) -> HttpResponse {
        let mut headers = HashMap::new();
        if let Some(value) = remaining {
            headers.insert(
                "x-remaining-this-second".to_string(),
                vec![value.to_string()],
            );
        }
        HttpResponse::new(200, headers, "{}")
    }

    #[test]
    fn test_no_delay_at_or_above_threshold() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.delay_for(8), Duration::ZERO);
        assert_eq!(limiter.delay_for(10), Duration::ZERO);
        assert_eq!(limiter.delay_for(u32::MAX), Duration::ZERO);
    }

    #[test]
    fn test_full_delay_when_quota_exhausted() {
        assert_eq!(
            RateLimiter::default().delay_for(0),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn test_delay_is_monotonic_non_increasing() {
        let limiter = RateLimiter::default();
        let delays: Vec<Duration> = (0..=12).map(|r| limiter.delay_for(r)).collect();
        assert!(delays.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_missing_header_defaults_to_ten() {
        let limiter = RateLimiter::default();
        assert_eq!(
            limiter.delay_after(&response_with_remaining(None)),
            Duration::ZERO
        );
        assert_eq!(
            limiter.delay_after(&response_with_remaining(Some("2"))),
            Duration::from_millis(600)
        );
    }

    #[test]
    fn test_disabled_limiter_never_delays() {
        assert_eq!(RateLimiter::disabled().delay_for(0), Duration::ZERO);
    }

    #[test]
    fn test_throttle_above_threshold_does_not_sleep() {
        let limiter = RateLimiter::default();
        let start = std::time::Instant::now();

        tokio_test::block_on(limiter.throttle(&response_with_remaining(Some("9"))));

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_sleeps_for_computed_delay() {
        let limiter = RateLimiter::default();
        let start = tokio::time::Instant::now();

        limiter.throttle(&response_with_remaining(Some("3"))).await;

        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
