//! Exponential backoff calculator for creation retries
//!
//! Delays grow exponentially with each attempt up to a configurable
//! cap, with optional jitter to keep many retrying clients from
//! synchronizing.

use std::time::Duration;

/// Exponential backoff schedule for retry delays.
///
/// # Example
///
/// ```
/// use aquifer_pool::retry::BackoffStrategy;
/// use std::time::Duration;
///
/// let backoff = BackoffStrategy::new(100, 30_000);
///
/// assert_eq!(backoff.delay_for(0), Duration::from_millis(100));
/// assert_eq!(backoff.delay_for(1), Duration::from_millis(200));
///
/// // Growth is capped at the maximum
/// assert!(backoff.delay_for(20) <= Duration::from_millis(30_000));
/// ```
#[derive(Debug, Clone)]
pub struct BackoffStrategy {
    /// Delay in milliseconds before the first retry
    initial_ms: u64,
    /// Cap in milliseconds for exponential growth
    max_ms: u64,
    /// Growth factor per attempt (default: 2.0)
    multiplier: f64,
    /// Whether delays are jittered (default: false for predictable testing)
    jitter: bool,
}

impl BackoffStrategy {
    /// Create a backoff schedule with the given initial delay and cap,
    /// both in milliseconds.
    pub fn new(initial_ms: u64, max_ms: u64) -> Self {
        let initial_ms = initial_ms.max(1);
        Self {
            initial_ms,
            max_ms: max_ms.max(initial_ms),
            multiplier: 2.0,
            jitter: false,
        }
    }

    /// Set the growth factor. Values below 1.0 are clamped to 1.0.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Enable jitter, randomizing each delay by up to ±25%.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before retry `attempt` (zero-based: attempt 0 is the first
    /// retry and waits the initial delay).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let raw_ms = (self.initial_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped_ms = raw_ms.min(self.max_ms as f64) as u64;

        let final_ms = if self.jitter {
            let range = capped_ms / 4;
            let offset = (pseudo_random() * (range * 2) as f64) as u64;
            capped_ms.saturating_sub(range).saturating_add(offset)
        } else {
            capped_ms
        };

        Duration::from_millis(final_ms)
    }

    /// Get the initial delay
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_ms)
    }

    /// Get the maximum delay
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

impl Default for BackoffStrategy {
    /// Default backoff: 100ms initial, 30 seconds max, 2x multiplier
    fn default() -> Self {
        Self::new(100, 30_000)
    }
}

/// Simple pseudo-random value in [0.0, 1.0) for jitter.
fn pseudo_random() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}
