//! Scoped guards
//!
//! A guard acquires a primitive when it's built and releases it when it's
//! dropped. Guards borrow the primitive, so it can't be moved or dropped
//! while held, and they can't be cloned: each guard is one acquisition.

use lock_api::RawRwLock;

use crate::traits::{Lock, Semaphore};

/// A guard over any [Lock].
///
/// # Example
/// ```
/// use ftsync::{LockGuard, SpinSemaphore};
///
/// let sem = SpinSemaphore::with_capacity(2);
/// {
///     let _a = LockGuard::new(&sem);
///     let _b = LockGuard::new(&sem);
///     assert!(LockGuard::try_new(&sem).is_none());
/// }
/// assert_eq!(sem.num_counters(), 2);
/// ```
#[must_use = "if unused, the lock will release automatically"]
pub struct LockGuard<'a, L: Lock + ?Sized> {
    lock: &'a L,
}

impl<'a, L: Lock + ?Sized> LockGuard<'a, L> {
    /// Acquires `lock`, blocking until it's available.
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self { lock }
    }

    /// Acquires `lock` if that's possible without blocking.
    pub fn try_new(lock: &'a L) -> Option<Self> {
        lock.try_lock().then(|| Self { lock })
    }
}

impl<L: Lock + ?Sized> Drop for LockGuard<'_, L> {
    fn drop(&mut self) {
        /* SAFETY: the guard only exists after a successful acquisition */
        unsafe { self.lock.unlock() }
    }
}

/// A guard over a [Semaphore] that doesn't give its unit back.
///
/// Dropping it only wakes a parked thread, through
/// [unlock_destroy_counter](Semaphore::unlock_destroy_counter). The unit
/// acquired by the guard is consumed.
///
/// # Example
/// ```
/// use ftsync::{SemaphoreDestroyCounterGuard, SpinSemaphore};
///
/// let sem = SpinSemaphore::with_capacity(1);
/// drop(SemaphoreDestroyCounterGuard::new(&sem));
///
/// assert_eq!(sem.num_counters(), 0);
/// assert!(!sem.try_lock());
/// ```
#[must_use = "if unused, the semaphore will release automatically"]
pub struct SemaphoreDestroyCounterGuard<'a, S: Semaphore + ?Sized> {
    semaphore: &'a S,
}

impl<'a, S: Semaphore + ?Sized> SemaphoreDestroyCounterGuard<'a, S> {
    /// Takes a unit of `semaphore`, blocking until one is available.
    pub fn new(semaphore: &'a S) -> Self {
        semaphore.lock();
        Self { semaphore }
    }

    /// Takes a unit of `semaphore` if one is available right now.
    pub fn try_new(semaphore: &'a S) -> Option<Self> {
        semaphore.try_lock().then(|| Self { semaphore })
    }
}

impl<S: Semaphore + ?Sized> Drop for SemaphoreDestroyCounterGuard<'_, S> {
    fn drop(&mut self) {
        unsafe { self.semaphore.unlock_destroy_counter() }
    }
}

/// Shared access to a [ReadWriteLock](crate::ReadWriteLock).
///
/// # Example
/// ```
/// use ftsync::{ReadGuard, ReadWriteLock, WriteGuard};
///
/// let lock = ReadWriteLock::new();
/// {
///     let _r1 = ReadGuard::new(&lock);
///     let _r2 = ReadGuard::new(&lock);
///     assert!(WriteGuard::try_new(&lock).is_none());
/// }
/// let _w = WriteGuard::new(&lock);
/// assert!(ReadGuard::try_new(&lock).is_none());
/// ```
#[must_use = "if unused, the lock will release automatically"]
pub struct ReadGuard<'a, R: RawRwLock> {
    lock: &'a R,
}

impl<'a, R: RawRwLock> ReadGuard<'a, R> {
    /// Locks `lock` for reading, blocking while a writer holds it.
    pub fn new(lock: &'a R) -> Self {
        lock.lock_shared();
        Self { lock }
    }

    /// Locks `lock` for reading, if that's possible without blocking.
    pub fn try_new(lock: &'a R) -> Option<Self> {
        lock.try_lock_shared().then(|| Self { lock })
    }
}

impl<R: RawRwLock> Drop for ReadGuard<'_, R> {
    fn drop(&mut self) {
        unsafe { self.lock.unlock_shared() }
    }
}

/// Exclusive access to a [ReadWriteLock](crate::ReadWriteLock).
#[must_use = "if unused, the lock will release automatically"]
pub struct WriteGuard<'a, R: RawRwLock> {
    lock: &'a R,
}

impl<'a, R: RawRwLock> WriteGuard<'a, R> {
    /// Locks `lock` for writing, blocking until no one else holds it.
    pub fn new(lock: &'a R) -> Self {
        lock.lock_exclusive();
        Self { lock }
    }

    /// Locks `lock` for writing, if that's possible without blocking.
    pub fn try_new(lock: &'a R) -> Option<Self> {
        lock.try_lock_exclusive().then(|| Self { lock })
    }
}

impl<R: RawRwLock> Drop for WriteGuard<'_, R> {
    fn drop(&mut self) {
        unsafe { self.lock.unlock_exclusive() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReadWriteLock, SpinLock, SpinSemaphore};

    #[test]
    fn lock_guard_releases_once() {
        let lock = SpinLock::new();
        let guard = LockGuard::new(&lock);
        assert!(lock.is_locked());
        assert!(LockGuard::try_new(&lock).is_none());
        drop(guard);
        assert!(!lock.is_locked());
        let again = LockGuard::try_new(&lock);
        assert!(again.is_some());
    }

    #[test]
    fn guard_over_trait_object() {
        let sem = SpinSemaphore::new();
        let lock: &dyn Lock = &sem;
        {
            let _g = LockGuard::new(lock);
            assert_eq!(sem.num_counters(), 0);
        }
        assert_eq!(sem.num_counters(), 1);
    }

    #[test]
    fn destroy_counter_guard_consumes_unit() {
        let sem = SpinSemaphore::with_capacity(2);
        {
            let _g = SemaphoreDestroyCounterGuard::new(&sem);
            assert_eq!(sem.num_counters(), 1);
        }
        assert_eq!(sem.num_counters(), 1);
        sem.add_counter(1);
        assert_eq!(sem.num_counters(), 2);
    }

    #[test]
    #[cfg(not(loom))]
    fn rw_guards() {
        let lock = ReadWriteLock::new();
        {
            let _r = ReadGuard::new(&lock);
            assert_eq!(lock.num_readers(), 1);
            assert!(WriteGuard::try_new(&lock).is_none());
        }
        assert_eq!(lock.num_readers(), 0);
        {
            let _w = WriteGuard::new(&lock);
            assert!(lock.is_write_requested());
            assert!(ReadGuard::try_new(&lock).is_none());
        }
        assert!(!lock.is_write_requested());
    }
}
