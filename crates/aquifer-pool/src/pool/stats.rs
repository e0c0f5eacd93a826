//! Pool statistics types

use serde::{Deserialize, Serialize};

/// Snapshot of a resource pool's current state
///
/// Provides insight into pool utilization and backlog pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of resources the pool believes exist (idle + active)
    capacity: usize,
    /// Number of idle resources available in the pool
    idle: usize,
    /// Number of resources currently checked out
    active: usize,
    /// Number of requests waiting in the backlog
    waiting: usize,
}

impl PoolStats {
    /// Create new pool statistics
    pub fn new(capacity: usize, idle: usize, active: usize, waiting: usize) -> Self {
        Self {
            capacity,
            idle,
            active,
            waiting,
        }
    }

    /// Get the pool capacity (idle + active)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of idle resources
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Get the number of active (checked-out) resources
    pub fn active(&self) -> usize {
        self.active
    }

    /// Get the number of waiting requests
    pub fn waiting(&self) -> usize {
        self.waiting
    }

    /// Calculate pool utilization as a fraction (0.0 to 1.0)
    ///
    /// Returns 0.0 if capacity is 0 to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.active as f64 / self.capacity as f64
        }
    }

    /// Check if every existing resource is checked out
    pub fn is_full(&self) -> bool {
        self.idle == 0 && self.capacity > 0
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
