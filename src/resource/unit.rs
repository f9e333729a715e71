// ABOUTME: A single exclusively-lockable resource shared by two neighbouring agents.
// ABOUTME: Wraps an owned async mutex and tracks the holder for invariant checks.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::error::ResourceError;

const NO_HOLDER: usize = usize::MAX;

/// An exclusive resource in the ring.
///
/// # Lock Semantics
///
/// - **Blocking acquire:** `acquire()` waits until the resource is free. There
///   is no timeout.
/// - **Not reentrant:** an agent that already holds the resource gets
///   `ResourceError::Reentrant` instead of waiting on itself forever.
/// - **Owner-only release:** ownership is the returned [`ResourceGuard`];
///   releasing means consuming or dropping it.
#[derive(Debug)]
pub struct ResourceUnit {
    index: usize,
    lock: Mutex<()>,
    holder: AtomicUsize,
    occupancy: AtomicUsize,
    peak_occupancy: AtomicUsize,
    acquisitions: AtomicU64,
}

impl ResourceUnit {
    /// Create a free resource with the given ring index.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lock: Mutex::new(()),
            holder: AtomicUsize::new(NO_HOLDER),
            occupancy: AtomicUsize::new(0),
            peak_occupancy: AtomicUsize::new(0),
            acquisitions: AtomicU64::new(0),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The agent currently holding this resource, if any.
    pub fn holder(&self) -> Option<usize> {
        match self.holder.load(Ordering::Acquire) {
            NO_HOLDER => None,
            agent => Some(agent),
        }
    }

    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }

    /// Highest number of simultaneous holders ever observed.
    pub fn peak_occupancy(&self) -> usize {
        self.peak_occupancy.load(Ordering::Acquire)
    }

    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Acquire the resource for `agent`, waiting until it is free.
    ///
    /// Returns `Err(ResourceError::Reentrant)` if `agent` already holds it.
    pub async fn acquire(&self, agent: usize) -> Result<ResourceGuard<'_>, ResourceError> {
        self.check_reentrant(agent)?;
        let lock = self.lock.lock().await;
        self.grant(agent, lock)
    }

    /// Acquire the resource only if it is free right now.
    ///
    /// Returns `Ok(None)` if another agent holds it.
    pub fn try_acquire(&self, agent: usize) -> Result<Option<ResourceGuard<'_>>, ResourceError> {
        self.check_reentrant(agent)?;
        match self.lock.try_lock() {
            Ok(lock) => self.grant(agent, lock).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn check_reentrant(&self, agent: usize) -> Result<(), ResourceError> {
        // Only `agent` itself can have stored its own index here.
        if self.holder.load(Ordering::Acquire) == agent {
            return Err(ResourceError::Reentrant {
                resource: self.index,
                agent,
            });
        }
        Ok(())
    }

    fn grant<'a>(
        &'a self,
        agent: usize,
        lock: MutexGuard<'a, ()>,
    ) -> Result<ResourceGuard<'a>, ResourceError> {
        if let Err(holder) =
            self.holder
                .compare_exchange(NO_HOLDER, agent, Ordering::AcqRel, Ordering::Acquire)
        {
            return Err(ResourceError::DoubleHold {
                resource: self.index,
                holder,
                requester: agent,
            });
        }

        let occupants = self.occupancy.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak_occupancy.fetch_max(occupants, Ordering::AcqRel);
        self.acquisitions.fetch_add(1, Ordering::Relaxed);

        Ok(ResourceGuard {
            unit: self,
            agent,
            _lock: lock,
        })
    }
}

/// Proof that an agent holds a resource.
///
/// The resource is released when the guard is consumed by
/// [`ResourceGuard::release`] or dropped.
#[derive(Debug)]
pub struct ResourceGuard<'a> {
    unit: &'a ResourceUnit,
    agent: usize,
    _lock: MutexGuard<'a, ()>,
}

impl ResourceGuard<'_> {
    pub fn resource(&self) -> usize {
        self.unit.index
    }

    pub fn agent(&self) -> usize {
        self.agent
    }

    /// Hand the resource back.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        // Bookkeeping is cleared before `_lock` drops and lets the next
        // waiter in.
        self.unit.occupancy.fetch_sub(1, Ordering::AcqRel);
        self.unit.holder.store(NO_HOLDER, Ordering::Release);
    }
}
