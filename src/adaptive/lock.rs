use core::sync::atomic::{AtomicU32, Ordering};

use super::channel::{NativeChannel, WaitChannel};
use crate::traits::Lock;

const UNLOCKED: u32 = 0;
const LOCKED: u32 = 1;

/// An exclusive lock that parks contended threads in the OS.
///
/// It has the same contract as [SpinLock](crate::SpinLock), but a thread
/// that finds it held goes to sleep on the lock's wait token instead of
/// spinning. This suits longer critical sections, at the price of a
/// syscall on every [unlock](Self::unlock).
///
/// The parking strategy is the channel `C`, by default the
/// [NativeChannel] of the build.
///
/// # Example
/// ```
/// use ftsync::AdaptiveLock;
/// use std::sync::Arc;
/// use std::thread;
///
/// let lock = Arc::new(AdaptiveLock::new());
///
/// lock.lock();
/// let l = Arc::clone(&lock);
/// let t = thread::spawn(move || {
///     /* Sleeps until the main thread unlocks */
///     l.lock();
///     unsafe { l.unlock() };
/// });
///
/// unsafe { lock.unlock() };
/// t.join().unwrap();
/// ```
pub struct AdaptiveLock<C = NativeChannel> {
    token: AtomicU32,
    channel: C,
}

impl AdaptiveLock {
    /// Creates a new, unlocked `AdaptiveLock` on the native wait channel
    pub const fn new() -> Self {
        Self::with_channel(NativeChannel::INIT)
    }
}

impl<C: WaitChannel> AdaptiveLock<C> {
    /// Creates a new, unlocked `AdaptiveLock` parking through `channel`
    pub const fn with_channel(channel: C) -> Self {
        Self {
            token: AtomicU32::new(UNLOCKED),
            channel,
        }
    }

    /// Tries to take the lock without blocking.
    ///
    /// Never parks, and never succeeds while another thread holds the lock.
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.token
            .compare_exchange(UNLOCKED, LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Takes the lock, parking the thread until it's available.
    #[inline]
    pub fn lock(&self) {
        if !self.try_lock() {
            self.lock_contended();
        }
    }

    #[cold]
    fn lock_contended(&self) {
        tracing::trace!(lock = ?(self as *const Self), "adaptive lock contended, parking");
        while self.token.swap(LOCKED, Ordering::Acquire) == LOCKED {
            self.channel.park(&self.token, LOCKED);
        }
    }

    /// Releases the lock and wakes one parked thread.
    ///
    /// # Safety
    /// The calling thread must hold the lock.
    #[inline]
    pub unsafe fn unlock(&self) {
        self.token.store(UNLOCKED, Ordering::Release);
        self.channel.unpark_one(&self.token);
    }

    /// Returns true if the lock is currently held
    pub fn is_locked(&self) -> bool {
        self.token.load(Ordering::Relaxed) == LOCKED
    }
}

impl<C: WaitChannel> Default for AdaptiveLock<C> {
    fn default() -> Self {
        Self::with_channel(C::INIT)
    }
}

impl<C: WaitChannel> Lock for AdaptiveLock<C> {
    fn lock(&self) {
        AdaptiveLock::lock(self)
    }

    fn try_lock(&self) -> bool {
        AdaptiveLock::try_lock(self)
    }

    unsafe fn unlock(&self) {
        unsafe { AdaptiveLock::unlock(self) }
    }
}

unsafe impl<C: WaitChannel> lock_api::RawMutex for AdaptiveLock<C> {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::with_channel(C::INIT);

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        AdaptiveLock::lock(self)
    }

    fn try_lock(&self) -> bool {
        AdaptiveLock::try_lock(self)
    }

    unsafe fn unlock(&self) {
        unsafe { AdaptiveLock::unlock(self) }
    }

    fn is_locked(&self) -> bool {
        AdaptiveLock::is_locked(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::channel::Emulated;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    fn hammer<C: WaitChannel + Send + 'static>(lock: AdaptiveLock<C>) {
        const THREADS: usize = 4;
        const ITERS: usize = 2000;

        let lock = Arc::new(lock);
        let count = Arc::new(AtomicUsize::new(0));

        let handles = (0..THREADS)
            .map(|_| {
                let lock = lock.clone();
                let count = count.clone();
                thread::spawn(move || {
                    for _ in 0..ITERS {
                        lock.lock();
                        let n = count.load(Ordering::Relaxed);
                        count.store(n + 1, Ordering::Relaxed);
                        unsafe { lock.unlock() };
                    }
                })
            })
            .collect::<Vec<_>>();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(count.load(Ordering::Relaxed), THREADS * ITERS);
        assert!(!lock.is_locked());
    }

    #[test]
    fn native_mutual_exclusion() {
        hammer(AdaptiveLock::new());
    }

    #[test]
    fn emulated_mutual_exclusion() {
        hammer(AdaptiveLock::with_channel(Emulated::new()));
    }

    #[test]
    fn try_lock_does_not_steal() {
        let lock = AdaptiveLock::new();
        assert!(lock.try_lock());
        assert!(!lock.try_lock());
        assert!(lock.is_locked());
        unsafe { lock.unlock() };
        assert!(lock.try_lock());
        unsafe { lock.unlock() };
    }
}
