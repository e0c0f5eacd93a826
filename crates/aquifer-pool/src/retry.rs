//! Retrying resource creation
//!
//! This module wraps a `ResourceFactory` so that failed creation
//! attempts are retried with exponential backoff before the failure is
//! surfaced to the pool.
//!
//! # Example
//!
//! ```ignore
//! use aquifer_pool::retry::{BackoffStrategy, RetryConfig, RetryingFactory};
//!
//! let backoff = BackoffStrategy::new(100, 30_000);
//! let config = RetryConfig::new(3, backoff);
//! let factory = RetryingFactory::new(my_factory, config);
//!
//! let pool = Pool::connect(PoolConfig::default(), factory).await;
//! ```

mod backoff;
mod factory;


pub use backoff::BackoffStrategy;
pub use factory::{RetryConfig, RetryingFactory};
