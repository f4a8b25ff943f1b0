//! A read-write lock

use crate::loom::hint;
use crate::loom::loom_const_fn;
use crate::loom::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// A spinning read-write lock
///
/// This lock allows an arbitrary amount of readers, or a single writer
/// at the same time.
///
/// A writer first raises a "write request", which stops new readers from
/// entering, and then waits for the readers already inside to leave.
/// This prefers writers, but only as a policy: there's no queue, so under
/// adversarial scheduling readers and writers may starve each other.
///
/// The lock can't be upgraded or downgraded. For a lock owning the data
/// it protects, see [RwLock](crate::RwLock).
///
/// # Example
/// ```
/// use ftsync::ReadWriteLock;
///
/// let lock = ReadWriteLock::new();
///
/// lock.read_lock();
/// lock.read_lock();
/// assert_eq!(lock.num_readers(), 2);
/// assert!(!lock.write_try_lock());
///
/// unsafe {
///     lock.read_unlock();
///     lock.read_unlock();
/// }
///
/// lock.write_lock();
/// assert!(!lock.read_try_lock());
/// unsafe { lock.write_unlock() };
/// ```
pub struct ReadWriteLock {
    readers: AtomicU32,
    write_request: AtomicBool,
}

impl ReadWriteLock {
    loom_const_fn! {
        /// Creates a new, unlocked `ReadWriteLock`
        pub const fn new() -> Self {
            Self {
                readers: AtomicU32::new(0),
                write_request: AtomicBool::new(false),
            }
        }
    }

    /// Locks `self` for reading, spinning while a writer holds or
    /// requests the lock.
    ///
    /// The reader registers itself and then checks the write request
    /// again. If a writer raised it in between, the reader backs off and
    /// spins again, so a reader never enters while a writer is inside.
    pub fn read_lock(&self) {
        loop {
            while self.write_request.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
            if self.try_register_reader() {
                return;
            }
        }
    }

    /// Single attempt at [read_lock](Self::read_lock).
    /// Returns false if a writer holds or requests the lock.
    pub fn read_try_lock(&self) -> bool {
        !self.write_request.load(Ordering::Relaxed) && self.try_register_reader()
    }

    /* The reader count and the write request are published in opposite
     * order by readers and writers. Both sides use SeqCst so at least one
     * of them sees the other. */
    fn try_register_reader(&self) -> bool {
        self.readers.fetch_add(1, Ordering::SeqCst);
        if self.write_request.load(Ordering::SeqCst) {
            self.readers.fetch_sub(1, Ordering::Release);
            false
        } else {
            true
        }
    }

    /// Releases a read lock.
    ///
    /// # Safety
    /// The calling thread must hold a read lock on `self`.
    pub unsafe fn read_unlock(&self) {
        self.readers.fetch_sub(1, Ordering::Release);
    }

    /// Locks `self` for writing.
    ///
    /// Spins until this thread owns the write request, then spins until
    /// every reader has left.
    pub fn write_lock(&self) {
        while self
            .write_request
            .compare_exchange_weak(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_err()
        {
            while self.write_request.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
        while self.readers.load(Ordering::SeqCst) != 0 {
            hint::spin_loop();
        }
    }

    /// Single attempt at [write_lock](Self::write_lock).
    ///
    /// Returns false if another writer holds the request, or if readers
    /// are inside. In the latter case the request is withdrawn again.
    pub fn write_try_lock(&self) -> bool {
        if self
            .write_request
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }
        if self.readers.load(Ordering::SeqCst) == 0 {
            true
        } else {
            self.write_request.store(false, Ordering::Release);
            false
        }
    }

    /// Releases the write lock.
    ///
    /// # Safety
    /// The calling thread must hold the write lock on `self`.
    pub unsafe fn write_unlock(&self) {
        self.write_request.store(false, Ordering::Release);
    }

    /// Returns the number of readers currently registered
    pub fn num_readers(&self) -> u32 {
        self.readers.load(Ordering::Relaxed)
    }

    /// Returns true if a writer holds or waits for the lock
    pub fn is_write_requested(&self) -> bool {
        self.write_request.load(Ordering::Relaxed)
    }
}

impl Default for ReadWriteLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(loom))]
unsafe impl lock_api::RawRwLock for ReadWriteLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock_shared(&self) {
        self.read_lock()
    }

    fn try_lock_shared(&self) -> bool {
        self.read_try_lock()
    }

    unsafe fn unlock_shared(&self) {
        unsafe { self.read_unlock() }
    }

    fn lock_exclusive(&self) {
        self.write_lock()
    }

    fn try_lock_exclusive(&self) -> bool {
        self.write_try_lock()
    }

    unsafe fn unlock_exclusive(&self) {
        unsafe { self.write_unlock() }
    }

    fn is_locked(&self) -> bool {
        self.is_write_requested() || self.num_readers() > 0
    }

    fn is_locked_exclusive(&self) -> bool {
        self.is_write_requested()
    }
}

/// A read-write lock owning the data it protects, built on [ReadWriteLock]
#[cfg(not(loom))]
pub type RwLock<T> = lock_api::RwLock<ReadWriteLock, T>;
/// Shared access to the data of a [RwLock]
#[cfg(not(loom))]
pub type RwLockReadGuard<'a, T> = lock_api::RwLockReadGuard<'a, ReadWriteLock, T>;
/// Unique access to the data of a [RwLock]
#[cfg(not(loom))]
pub type RwLockWriteGuard<'a, T> = lock_api::RwLockWriteGuard<'a, ReadWriteLock, T>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loom;
    use crate::loom::sync::Arc;
    use crate::loom::thread;

    #[test]
    fn readers_share() {
        let lock = ReadWriteLock::new();
        lock.read_lock();
        assert!(lock.read_try_lock());
        lock.read_lock();
        assert_eq!(lock.num_readers(), 3);
        assert!(!lock.write_try_lock());
        /* The failed attempt withdrew its request */
        assert!(!lock.is_write_requested());
        unsafe {
            lock.read_unlock();
            lock.read_unlock();
            lock.read_unlock();
        }
        assert!(lock.write_try_lock());
        assert!(!lock.write_try_lock());
        assert!(!lock.read_try_lock());
        assert_eq!(lock.num_readers(), 0);
        unsafe { lock.write_unlock() };
        assert!(lock.read_try_lock());
    }

    #[test]
    fn repeated_write_lock() {
        let lock = ReadWriteLock::default();
        lock.write_lock();
        unsafe { lock.write_unlock() };
        lock.write_lock();
        unsafe { lock.write_unlock() };
        assert!(!lock.is_write_requested());
    }

    #[test]
    fn reader_never_sees_writer() {
        use crate::loom::sync::atomic::AtomicBool;

        loom::model(|| {
            let lock = Arc::new(ReadWriteLock::new());
            let writing = Arc::new(AtomicBool::new(false));

            let l = lock.clone();
            let w = writing.clone();
            let writer = thread::spawn(move || {
                l.write_lock();
                w.store(true, Ordering::Relaxed);
                w.store(false, Ordering::Relaxed);
                unsafe { l.write_unlock() };
            });

            lock.read_lock();
            assert!(!writing.load(Ordering::Relaxed));
            unsafe { lock.read_unlock() };

            writer.join().unwrap();
        });
    }

    #[test]
    #[cfg(not(loom))]
    fn data_wrapper() {
        let lock = RwLock::new(5);
        {
            let a = lock.read();
            let b = lock.read();
            assert_eq!(*a + *b, 10);
            assert!(lock.try_write().is_none());
        }
        *lock.write() += 1;
        assert_eq!(*lock.read(), 6);
    }
}
