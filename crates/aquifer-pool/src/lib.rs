//! Aquifer Pool - bounded, self-healing resource pooling
//!
//! This crate manages a fixed but elastic set of expensive, stateful
//! resources shared across concurrent consumers: idle resources are
//! reused oldest-first, dead ones are replaced transparently, capacity
//! grows under load up to a ceiling, and a pool whose generator has
//! failed completely recovers on its own once the generator comes back.

pub mod pool;
pub mod retry;

pub use aquifer_core::{Error, ResourceFactory, Result};
pub use pool::{Pool, PoolConfig, PoolStats, PooledResource};
pub use retry::{BackoffStrategy, RetryConfig, RetryingFactory};
