//! Checked-out resource handle

use std::ops::{Deref, DerefMut};
use std::sync::Weak;

use aquifer_core::{Error, ResourceFactory, Result};

use super::pool::PoolInner;

/// A resource checked out from the pool.
///
/// Forwards access to the underlying resource while it is held, and
/// returns the resource to the pool when dropped or explicitly
/// released. Holds only a weak reference to the pool, so it never keeps
/// the pool alive and tolerates the pool being dropped first (the
/// resource is then torn down by its own destructor).
pub struct PooledResource<F: ResourceFactory> {
    resource: Option<F::Resource>,
    pool: Weak<PoolInner<F>>,
}

impl<F: ResourceFactory> PooledResource<F> {
    pub(crate) fn new(resource: F::Resource, pool: Weak<PoolInner<F>>) -> Self {
        Self {
            resource: Some(resource),
            pool,
        }
    }

    /// Get the underlying resource.
    ///
    /// Returns [`Error::Disconnected`] if the resource was already
    /// returned to the pool.
    pub fn get(&self) -> Result<&F::Resource> {
        self.resource.as_ref().ok_or(Error::Disconnected)
    }

    /// Get mutable access to the underlying resource.
    pub fn get_mut(&mut self) -> Result<&mut F::Resource> {
        self.resource.as_mut().ok_or(Error::Disconnected)
    }

    /// Check whether this handle still owns its resource
    pub fn is_connected(&self) -> bool {
        self.resource.is_some()
    }

    /// Take the resource back out, leaving the handle disconnected so
    /// its drop is a no-op. Used when a hand-off is rejected and the
    /// resource must move on without re-entering the pool lock.
    pub(crate) fn take_resource(mut self) -> Option<F::Resource> {
        self.resource.take()
    }

    /// Return the resource to the pool early.
    ///
    /// Safe to call more than once; every call after the first is a
    /// no-op. Dropping the handle has the same effect.
    pub fn release(&mut self) {
        if let Some(resource) = self.resource.take() {
            if let Some(pool) = self.pool.upgrade() {
                pool.release_resource(resource);
            }
        }
    }
}

impl<F: ResourceFactory> Deref for PooledResource<F> {
    type Target = F::Resource;

    /// # Panics
    ///
    /// Panics if the resource was already released; use [`Self::get`]
    /// for a fallible accessor.
    fn deref(&self) -> &Self::Target {
        self.resource.as_ref().expect("resource already released")
    }
}

impl<F: ResourceFactory> DerefMut for PooledResource<F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resource.as_mut().expect("resource already released")
    }
}

impl<F: ResourceFactory> Drop for PooledResource<F> {
    fn drop(&mut self) {
        self.release();
    }
}
