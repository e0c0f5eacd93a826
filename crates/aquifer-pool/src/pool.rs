//! Resource pooling
//!
//! This module provides the pool itself: bounded concurrent checkout,
//! FIFO reuse of idle resources, a FIFO backlog of waiting acquirers,
//! and lazy recovery from total generator failure.
//!
//! # Example
//!
//! ```ignore
//! use aquifer_pool::pool::{Pool, PoolConfig};
//!
//! let config = PoolConfig::new(2, 10)
//!     .with_acquire_timeout_ms(5000);
//!
//! let pool = Pool::connect(config, factory).await;
//! let resource = pool.acquire().await?;
//! // Use resource...
//! // Resource returned to the pool on drop
//! ```

mod config;
mod handle;
mod pool;
mod stats;


pub use config::PoolConfig;
pub use handle::PooledResource;
pub use pool::Pool;
pub use stats::PoolStats;
