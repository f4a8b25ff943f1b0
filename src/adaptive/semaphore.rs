use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use super::channel::{NativeChannel, WaitChannel};
use crate::traits::{Lock, Semaphore};

/// A counting semaphore that parks waiting threads in the OS.
///
/// The counter is the source of truth for the available units. The wait
/// token is a generation number, bumped by every release, that only
/// decides whether a failed acquirer may go to sleep.
///
/// # Example
/// ```
/// use ftsync::AdaptiveSemaphore;
/// use std::sync::Arc;
/// use std::thread;
///
/// let sem = Arc::new(AdaptiveSemaphore::with_capacity(0));
///
/// let s = Arc::clone(&sem);
/// let consumer = thread::spawn(move || {
///     /* Sleeps until a unit is released */
///     s.lock();
/// });
///
/// sem.unlock();
/// consumer.join().unwrap();
/// assert_eq!(sem.num_counters(), 0);
/// ```
pub struct AdaptiveSemaphore<C = NativeChannel> {
    counter: AtomicI32,
    token: AtomicU32,
    channel: C,
}

impl AdaptiveSemaphore {
    /// Creates a new semaphore with a capacity of 1
    pub const fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates a new semaphore with `capacity` units available
    pub const fn with_capacity(capacity: i32) -> Self {
        Self::with_channel(capacity, NativeChannel::INIT)
    }
}

impl<C: WaitChannel> AdaptiveSemaphore<C> {
    /// Creates a new semaphore with `capacity` units, parking through `channel`
    pub const fn with_channel(capacity: i32, channel: C) -> Self {
        Self {
            counter: AtomicI32::new(capacity),
            token: AtomicU32::new(0),
            channel,
        }
    }

    /// Makes a single attempt to take a unit, without parking.
    pub fn try_lock(&self) -> bool {
        let prev = self.counter.fetch_sub(1, Ordering::Acquire);
        if prev > 0 {
            return true;
        }
        /* Our decrement may have made a concurrent acquirer fail. If undoing
         * it exposes a unit, that acquirer must not stay asleep. */
        if self.counter.fetch_add(1, Ordering::Relaxed) >= 0 {
            self.wake_one();
        }
        false
    }

    /// Takes a unit, parking the thread until one is available.
    pub fn lock(&self) {
        loop {
            let generation = self.token.load(Ordering::Acquire);
            if self.try_lock() {
                return;
            }
            tracing::trace!(generation, "adaptive semaphore empty, parking");
            self.channel.park(&self.token, generation);
        }
    }

    /// Gives a unit back and wakes one parked thread.
    ///
    /// The wake is issued even when nobody seems to be parked, a thread
    /// may be between its failed attempt and its sleep.
    pub fn unlock(&self) {
        self.counter.fetch_add(1, Ordering::Release);
        self.wake_one();
    }

    /// Wakes one parked thread without giving a unit back.
    ///
    /// This is the release used by
    /// [SemaphoreDestroyCounterGuard](crate::SemaphoreDestroyCounterGuard).
    pub fn unlock_destroy_counter(&self) {
        self.wake_one();
    }

    fn wake_one(&self) {
        self.token.fetch_add(1, Ordering::Release);
        self.channel.unpark_one(&self.token);
    }

    /// Adds `n` units of capacity, waking as many parked threads
    pub fn add_counter(&self, n: i32) {
        self.counter.fetch_add(n, Ordering::Release);
        self.token.fetch_add(1, Ordering::Release);
        self.channel.unpark_all(&self.token);
    }

    /// Removes `n` units of capacity
    pub fn remove_counter(&self, n: i32) {
        self.counter.fetch_sub(n, Ordering::Relaxed);
    }

    /// Returns the state of the counter
    pub fn num_counters(&self) -> i32 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl<C: WaitChannel> Default for AdaptiveSemaphore<C> {
    fn default() -> Self {
        Self::with_channel(1, C::INIT)
    }
}

impl<C: WaitChannel> Lock for AdaptiveSemaphore<C> {
    fn lock(&self) {
        AdaptiveSemaphore::lock(self)
    }

    fn try_lock(&self) -> bool {
        AdaptiveSemaphore::try_lock(self)
    }

    unsafe fn unlock(&self) {
        AdaptiveSemaphore::unlock(self)
    }
}

impl<C: WaitChannel> Semaphore for AdaptiveSemaphore<C> {
    fn add_counter(&self, n: i32) {
        AdaptiveSemaphore::add_counter(self, n)
    }

    fn remove_counter(&self, n: i32) {
        AdaptiveSemaphore::remove_counter(self, n)
    }

    fn num_counters(&self) -> i32 {
        AdaptiveSemaphore::num_counters(self)
    }

    unsafe fn unlock_destroy_counter(&self) {
        AdaptiveSemaphore::unlock_destroy_counter(self)
    }
}
