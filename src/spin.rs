//! A spinlock, the simplest primitive of this crate

use crate::loom::hint;
use crate::loom::loom_const_fn;
use crate::loom::sync::atomic::{AtomicBool, Ordering};
use crate::traits::Lock;

/// A spin lock synchronization primitive.
///
/// Threads waiting for the lock busy-poll it instead of yielding to the
/// scheduler. This gives the lowest latency for very short critical
/// sections, but burns CPU time while contended. There is no fairness
/// between waiters, and no bound on how long a thread may spin.
///
/// For a lock owning the data it protects, see [SpinMutex](crate::SpinMutex).
///
/// # Example
/// ```
/// use ftsync::{SpinLock, LockGuard};
///
/// let lock = SpinLock::new();
/// {
///     let _guard = LockGuard::new(&lock);
///     assert!(!lock.try_lock());
/// }
/// assert!(lock.try_lock());
/// unsafe { lock.unlock() };
/// ```
pub struct SpinLock {
    lock: AtomicBool,
}

impl SpinLock {
    loom_const_fn! {
        /// Creates a new, unlocked `SpinLock`
        pub const fn new() -> Self {
            Self { lock: AtomicBool::new(false) }
        }
    }

    /// Tries to take the lock without waiting.
    /// Returns true if the calling thread now holds it.
    ///
    /// The successful exchange has acquire ordering, so every write made
    /// by the previous holder before [unlock](Self::unlock) is visible.
    #[inline]
    pub fn try_lock(&self) -> bool {
        !self.lock.swap(true, Ordering::Acquire)
    }

    /// Waits for the lock to be available, and takes it.
    ///
    /// While the lock is held by someone else, the flag is only read (with
    /// relaxed ordering), so the cache line isn't bounced between waiters.
    /// Once it reads unlocked the exchange is retried.
    #[inline]
    pub fn lock(&self) {
        while !self.try_lock() {
            while self.is_locked() {
                hint::spin_loop();
            }
        }
    }

    /// Releases the lock, with release ordering.
    ///
    /// # Safety
    /// The calling thread must hold the lock.
    #[inline]
    pub unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// Returns true if the lock is currently held
    pub fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Relaxed)
    }
}

impl Default for SpinLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for SpinLock {
    fn lock(&self) {
        SpinLock::lock(self)
    }

    fn try_lock(&self) -> bool {
        SpinLock::try_lock(self)
    }

    unsafe fn unlock(&self) {
        unsafe { SpinLock::unlock(self) }
    }
}

#[cfg(not(loom))]
unsafe impl lock_api::RawMutex for SpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        SpinLock::lock(self)
    }

    fn try_lock(&self) -> bool {
        SpinLock::try_lock(self)
    }

    unsafe fn unlock(&self) {
        unsafe { SpinLock::unlock(self) }
    }

    fn is_locked(&self) -> bool {
        SpinLock::is_locked(self)
    }
}
