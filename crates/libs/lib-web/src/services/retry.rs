//! # Retry Policy
//!
//! Capped exponential backoff for outbound provider calls.
//!
//! - Retries on 429, 500, 502, 503, 504 and on transport failures (connect, timeout)
//! - Honors an integer-seconds `Retry-After` header, capped at `max_delay`
//! - `max_retries` counts retries after the first attempt

use std::time::Duration;

/// Default retry count after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// First backoff step (doubles per attempt)
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Whether a failed attempt number `attempt` (0-based) may be followed by another.
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay before retrying after failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)))
            .min(self.max_delay);

        match retry_after {
            Some(server_delay) => server_delay.min(self.max_delay).max(backoff),
            None => backoff,
        }
    }
}

/// Transient HTTP statuses worth retrying.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Parse a `Retry-After` value given in whole seconds. HTTP dates are not supported.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{status} should retry");
        }
        for status in [200, 400, 401, 404, 501] {
            assert!(!is_retryable_status(status), "{status} should not retry");
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0, None), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1, None), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2, None), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(10, None), Duration::from_secs(8));
    }

    #[test]
    fn test_retry_after_is_honored_within_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0, Some(Duration::from_secs(3))), Duration::from_secs(3));
        assert_eq!(policy.delay_for(0, Some(Duration::from_secs(120))), Duration::from_secs(8));
        // never shorter than our own backoff
        assert_eq!(policy.delay_for(2, Some(Duration::from_secs(0))), Duration::from_secs(2));
    }

    #[test]
    fn test_allows_retry_counts_after_first_attempt() {
        let policy = RetryPolicy::new(2);
        assert!(policy.allows_retry(0));
        assert!(policy.allows_retry(1));
        assert!(!policy.allows_retry(2));
        assert!(!RetryPolicy::none().allows_retry(0));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(" 7 "), Some(Duration::from_secs(7)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
