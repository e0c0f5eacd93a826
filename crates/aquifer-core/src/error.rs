//! Error types for aquifer

use thiserror::Error;

/// Core error type for aquifer operations
#[derive(Error, Debug)]
pub enum Error {
    /// The pool could not produce a resource. Raised when capacity has
    /// fallen to zero and the recovery attempt also failed, or when the
    /// pool has been closed. The pool stays usable afterward; later
    /// acquisitions retry recovery.
    #[error("unable to obtain resource: {0}")]
    Unavailable(String),

    /// A single resource construction attempt failed. Factories return
    /// this from `create`; the pool absorbs it wherever a replacement
    /// can plausibly succeed.
    #[error("resource creation failed: {0}")]
    Create(String),

    /// A bounded wait for a resource elapsed.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A handle was used after its resource was returned to the pool.
    #[error("handle is disconnected from its resource")]
    Disconnected,
}

/// Result type alias for aquifer operations
pub type Result<T> = std::result::Result<T, Error>;
