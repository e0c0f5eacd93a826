//! Resource pool implementation

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use aquifer_core::{Error, ResourceFactory, Result};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::config::PoolConfig;
use super::handle::PooledResource;
use super::stats::PoolStats;

/// A queued acquisition request, completed by whichever task next
/// releases a resource or finishes a growth attempt. Carries a fully
/// checked-out handle so a waiter that is cancelled after the send
/// still returns the resource through the handle's drop.
type Waiter<F> = oneshot::Sender<Result<PooledResource<F>>>;

/// Idle entry with the metadata needed for expiry checks
struct IdleEntry<R> {
    resource: R,
    created_at: Instant,
    idle_since: Instant,
}

impl<R> IdleEntry<R> {
    fn new(resource: R) -> Self {
        let now = Instant::now();
        Self {
            resource,
            created_at: now,
            idle_since: now,
        }
    }
}

/// Mutable pool state, all of it behind one lock.
///
/// Both queues are FIFO: the resource released longest ago is reused
/// first, and the request queued longest is served first.
struct PoolState<F: ResourceFactory> {
    idle: VecDeque<IdleEntry<F::Resource>>,
    waiters: VecDeque<Waiter<F>>,
}

pub(crate) struct PoolInner<F: ResourceFactory> {
    config: PoolConfig,
    factory: F,
    state: Mutex<PoolState<F>>,
    /// Resources believed to exist (idle + checked out). Read lock-free
    /// by the zero-capacity recovery check; mutated only on the state
    /// transitions that create or destroy a resource.
    capacity: AtomicUsize,
    /// Resources currently checked out
    active: AtomicUsize,
    closed: AtomicBool,
}

impl<F: ResourceFactory> PoolInner<F> {
    /// Hand a resource to the oldest live waiter, or park it in the
    /// idle set if nobody is waiting.
    ///
    /// The direct hand-off skips the idle set entirely, so a waiter is
    /// served without an extra round trip and without waking anyone
    /// else up. What goes through the channel is an already-checked-out
    /// handle: if the waiter is cancelled after the send lands, the
    /// unread handle re-releases the resource on drop instead of
    /// leaking the capacity slot.
    fn distribute(self: &Arc<Self>, resource: F::Resource) {
        let mut resource = resource;
        let mut state = self.state.lock();
        while let Some(waiter) = state.waiters.pop_front() {
            self.active.fetch_add(1, Ordering::SeqCst);
            let handle = PooledResource::new(resource, Arc::downgrade(self));
            match waiter.send(Ok(handle)) {
                Ok(()) => return,
                // Waiter gave up before the send; take the resource
                // back out of the handle (not via drop, which would
                // re-enter this lock) and pass it to the next one.
                Err(rejected) => {
                    self.active.fetch_sub(1, Ordering::SeqCst);
                    let Some(returned) = rejected.ok().and_then(PooledResource::take_resource)
                    else {
                        return;
                    };
                    resource = returned;
                }
            }
        }
        state.idle.push_back(IdleEntry::new(resource));
    }

    /// Take back a checked-out resource.
    ///
    /// Never fails. After teardown the resource is discarded through the
    /// factory instead of being re-pooled; disposal runs on a spawned
    /// task because this is called from synchronous drop.
    pub(crate) fn release_resource(self: &Arc<Self>, resource: F::Resource) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.closed.load(Ordering::SeqCst) {
            self.capacity.fetch_sub(1, Ordering::SeqCst);
            let inner = Arc::clone(self);
            tokio::spawn(async move { inner.factory.dispose(resource).await });
            return;
        }
        self.distribute(resource);
    }
}

/// A pool of expensive, reusable resources.
///
/// Cheap to clone; all clones share the same state. Checked-out
/// resources hold only a weak reference back to the pool, so dropping
/// the last `Pool` clone while handles are outstanding is safe.
pub struct Pool<F: ResourceFactory> {
    inner: Arc<PoolInner<F>>,
}

impl<F: ResourceFactory> Clone for Pool<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ResourceFactory> Pool<F> {
    /// Create a pool and eagerly construct `initial_size` resources.
    ///
    /// Construction never fails: each creation failure is logged and
    /// tolerated, and the capacity reflects how many resources were
    /// actually obtained. A pool that starts at zero capacity recovers
    /// lazily on the first acquisition once the factory works again.
    pub async fn connect(config: PoolConfig, factory: F) -> Self {
        let pool = Self {
            inner: Arc::new(PoolInner {
                config,
                factory,
                state: Mutex::new(PoolState {
                    idle: VecDeque::new(),
                    waiters: VecDeque::new(),
                }),
                capacity: AtomicUsize::new(0),
                active: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
            }),
        };

        let initial = pool.inner.config.initial_size();
        for attempt in 1..=initial {
            match pool.inner.factory.create().await {
                Ok(resource) => {
                    pool.inner
                        .state
                        .lock()
                        .idle
                        .push_back(IdleEntry::new(resource));
                    pool.inner.capacity.fetch_add(1, Ordering::SeqCst);
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "initial resource creation failed");
                }
            }
        }

        pool
    }

    /// Acquire a resource, waiting in the backlog if none is available.
    ///
    /// Resolution is guaranteed: the caller either receives a resource
    /// handed over by a later release or growth, or an
    /// [`Error::Unavailable`] when the pool detects total generator
    /// failure or is closed.
    pub async fn acquire(&self) -> Result<PooledResource<F>> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(Error::Unavailable("pool is closed".into()));
        }

        // Recovery from total failure: one creation attempt before the
        // lock. Racing callers may each attempt one; the spare simply
        // lands in the idle set.
        if self.inner.capacity.load(Ordering::SeqCst) == 0 {
            match self.inner.factory.create().await {
                Ok(resource) => {
                    // Capacity is published before the resource so a
                    // racing caller cannot observe zero and flush the
                    // backlog while a live resource is being parked.
                    self.inner.capacity.fetch_add(1, Ordering::SeqCst);
                    self.inner
                        .state
                        .lock()
                        .idle
                        .push_back(IdleEntry::new(resource));
                }
                Err(err) => {
                    // The generator is down. Fail everyone queued behind
                    // it rather than letting the backlog grow unbounded.
                    let waiters: Vec<_> = self.inner.state.lock().waiters.drain(..).collect();
                    for waiter in waiters {
                        let _ = waiter.send(Err(Error::Unavailable(
                            "resource generator is failing".into(),
                        )));
                    }
                    return Err(Error::Unavailable(format!(
                        "resource generator is failing: {err}"
                    )));
                }
            }
        }

        let popped = {
            let mut state = self.inner.state.lock();
            // Re-checked under the lock: close() drains the backlog
            // under this same lock, so a request that passed the fast
            // check above must not queue behind the drain.
            if self.inner.closed.load(Ordering::SeqCst) {
                return Err(Error::Unavailable("pool is closed".into()));
            }
            match state.idle.pop_front() {
                Some(entry) => Ok(entry),
                None => {
                    let (tx, rx) = oneshot::channel();
                    state.waiters.push_back(tx);
                    Err(rx)
                }
            }
        };

        let rx = match popped {
            Ok(entry) => {
                let resource = self.revive(entry).await;
                self.grow_if_drained().await;
                match resource {
                    Some(resource) => return Ok(self.checkout(resource)),
                    // Replacement failed too; queue up like everyone else.
                    None => self.enqueue_waiter()?,
                }
            }
            Err(rx) => rx,
        };

        self.wait(rx).await
    }

    /// Acquire with the configured bound on waiting time.
    ///
    /// Maps an elapsed wait to [`Error::Timeout`]. A timed-out request
    /// leaves the backlog passively: the hand-off path skips its dead
    /// receiver and serves the next waiter, and a hand-off that landed
    /// just before the timeout is returned to the pool by the unread
    /// handle's drop.
    pub async fn acquire_timeout(&self) -> Result<PooledResource<F>> {
        let timeout = self.inner.config.acquire_timeout();
        match tokio::time::timeout(timeout, self.acquire()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "no resource became available within {timeout:?}"
            ))),
        }
    }

    /// Tear down the pool: dispose every idle resource exactly once and
    /// fail every queued waiter.
    ///
    /// Checked-out resources are not reclaimed; they are discarded
    /// through the factory when their handles are released.
    pub async fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);

        let (idle, waiters) = {
            let mut state = self.inner.state.lock();
            let idle: Vec<_> = state.idle.drain(..).collect();
            let waiters: Vec<_> = state.waiters.drain(..).collect();
            (idle, waiters)
        };

        for waiter in waiters {
            let _ = waiter.send(Err(Error::Unavailable("pool is closed".into())));
        }
        for entry in idle {
            self.inner.capacity.fetch_sub(1, Ordering::SeqCst);
            self.inner.factory.dispose(entry.resource).await;
        }
    }

    /// Get current pool statistics
    pub fn stats(&self) -> PoolStats {
        let (idle, waiting) = {
            let state = self.inner.state.lock();
            (state.idle.len(), state.waiters.len())
        };
        PoolStats::new(
            self.inner.capacity.load(Ordering::SeqCst),
            idle,
            self.inner.active.load(Ordering::SeqCst),
            waiting,
        )
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// Liveness-check a popped idle entry; if it is dead, dispose it and
    /// try a single replacement.
    ///
    /// Returns None when the replacement also failed, in which case the
    /// capacity slot is simply lost until a later operation re-grows it.
    async fn revive(&self, entry: IdleEntry<F::Resource>) -> Option<F::Resource> {
        if self.is_live(&entry).await {
            return Some(entry.resource);
        }
        self.inner.capacity.fetch_sub(1, Ordering::SeqCst);
        self.inner.factory.dispose(entry.resource).await;
        match self.inner.factory.create().await {
            Ok(resource) => {
                self.inner.capacity.fetch_add(1, Ordering::SeqCst);
                Some(resource)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to replace dead resource");
                None
            }
        }
    }

    async fn is_live(&self, entry: &IdleEntry<F::Resource>) -> bool {
        if let Some(max_lifetime) = self.inner.config.max_lifetime() {
            if entry.created_at.elapsed() > max_lifetime {
                return false;
            }
        }
        if entry.idle_since.elapsed() > self.inner.config.idle_timeout() {
            return false;
        }
        self.inner.factory.validate(&entry.resource).await
    }

    /// Opportunistic growth: if this acquire drained the idle set and
    /// the ceiling leaves room, create one more resource so the next
    /// caller finds the pool primed.
    ///
    /// Best-effort. The capacity slot is claimed before creating so the
    /// ceiling holds even when growers race; on failure the claim is
    /// returned and the miss is merely logged.
    async fn grow_if_drained(&self) {
        let drained = self.inner.state.lock().idle.is_empty();
        if !drained {
            return;
        }
        let ceiling = self.inner.config.max_size();
        let claimed = self
            .inner
            .capacity
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |capacity| {
                (capacity < ceiling).then_some(capacity + 1)
            })
            .is_ok();
        if !claimed {
            return;
        }
        match self.inner.factory.create().await {
            Ok(resource) => self.inner.distribute(resource),
            Err(err) => {
                self.inner.capacity.fetch_sub(1, Ordering::SeqCst);
                tracing::debug!(error = %err, "opportunistic growth attempt failed");
            }
        }
    }

    fn enqueue_waiter(&self) -> Result<oneshot::Receiver<Result<PooledResource<F>>>> {
        let mut state = self.inner.state.lock();
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(Error::Unavailable("pool is closed".into()));
        }
        let (tx, rx) = oneshot::channel();
        state.waiters.push_back(tx);
        Ok(rx)
    }

    async fn wait(
        &self,
        rx: oneshot::Receiver<Result<PooledResource<F>>>,
    ) -> Result<PooledResource<F>> {
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(Error::Unavailable("pool went away while waiting".into())),
        }
    }

    fn checkout(&self, resource: F::Resource) -> PooledResource<F> {
        self.inner.active.fetch_add(1, Ordering::SeqCst);
        PooledResource::new(resource, Arc::downgrade(&self.inner))
    }
}
