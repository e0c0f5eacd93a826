//! Resource factory trait

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the pool with everything it needs to know about a resource.
///
/// A resource is an opaque, expensive, stateful capability (a network
/// connection, typically). The pool only requires three things from it:
/// a constructor that may fail, a liveness predicate, and a cleanup
/// routine that never fails.
#[async_trait]
pub trait ResourceFactory: Send + Sync + 'static {
    /// The resource type managed by the pool.
    ///
    /// `Sync` is required because liveness checks borrow the resource
    /// across an await point.
    type Resource: Send + Sync + 'static;

    /// Create a new resource.
    ///
    /// May be slow (network I/O) and may fail. The pool invokes this at
    /// construction, at recovery from total failure, and at opportunistic
    /// growth points.
    async fn create(&self) -> Result<Self::Resource>;

    /// Check whether an idle resource is still usable before it is
    /// handed out.
    ///
    /// Default implementation always returns true.
    async fn validate(&self, resource: &Self::Resource) -> bool {
        let _ = resource;
        true
    }

    /// Tear down a resource.
    ///
    /// Assumed non-failing. Invoked when the pool discards a dead
    /// resource and at teardown. The default implementation simply
    /// drops the resource.
    async fn dispose(&self, resource: Self::Resource) {
        drop(resource);
    }
}

#[async_trait]
impl<T: ResourceFactory> ResourceFactory for Arc<T> {
    type Resource = T::Resource;

    async fn create(&self) -> Result<Self::Resource> {
        (**self).create().await
    }

    async fn validate(&self, resource: &Self::Resource) -> bool {
        (**self).validate(resource).await
    }

    async fn dispose(&self, resource: Self::Resource) {
        (**self).dispose(resource).await
    }
}
