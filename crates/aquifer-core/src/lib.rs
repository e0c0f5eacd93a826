//! Aquifer Core - Core abstractions for the aquifer resource pool
//!
//! This crate provides the fundamental traits and types that the other
//! aquifer crates depend on. It defines:
//!
//! - `ResourceFactory` - Trait supplying the pool with resource construction,
//!   liveness checking, and cleanup
//! - `Error` / `Result` - Common error type for pool operations

mod error;
mod factory;

pub use error::*;
pub use factory::*;
