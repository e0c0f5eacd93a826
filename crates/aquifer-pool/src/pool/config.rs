//! Pool configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a resource pool
///
/// Controls initial sizing, the capacity ceiling, and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of resources created eagerly at construction
    initial_size: usize,
    /// Maximum number of resources the pool may hold (the ceiling)
    max_size: usize,
    /// Timeout in milliseconds for the bounded-wait acquire variant
    acquire_timeout_ms: u64,
    /// Timeout in milliseconds before an idle resource is considered stale
    idle_timeout_ms: u64,
    /// Maximum lifetime of a resource in milliseconds before it is recycled
    max_lifetime_ms: Option<u64>,
}

impl PoolConfig {
    /// Create a new pool configuration with the given initial and maximum sizes.
    ///
    /// Sizes are clamped rather than rejected: `initial_size` is floored
    /// to 1, and `max_size` is raised to `initial_size` if smaller.
    pub fn new(initial_size: usize, max_size: usize) -> Self {
        let initial_size = initial_size.max(1);
        Self {
            initial_size,
            max_size: max_size.max(initial_size),
            acquire_timeout_ms: 30_000, // 30 seconds default
            idle_timeout_ms: 600_000,   // 10 minutes default
            max_lifetime_ms: None,
        }
    }

    /// Set the acquire timeout in milliseconds
    pub fn with_acquire_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.acquire_timeout_ms = timeout_ms;
        self
    }

    /// Set the idle timeout in milliseconds
    pub fn with_idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.idle_timeout_ms = timeout_ms;
        self
    }

    /// Set the maximum resource lifetime in milliseconds
    pub fn with_max_lifetime_ms(mut self, lifetime_ms: u64) -> Self {
        self.max_lifetime_ms = Some(lifetime_ms);
        self
    }

    /// Get the initial pool size
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Get the capacity ceiling
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get the acquire timeout as a Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Get the idle timeout as a Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Get the maximum lifetime as a Duration if set
    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_ms.map(Duration::from_millis)
    }
}

impl Default for PoolConfig {
    /// Create a default pool configuration
    ///
    /// Defaults:
    /// - initial_size: 1
    /// - max_size: 10
    /// - acquire_timeout: 30 seconds
    /// - idle_timeout: 10 minutes
    /// - max_lifetime: None
    fn default() -> Self {
        Self::new(1, 10)
    }
}
