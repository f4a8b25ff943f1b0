use crate::loom::hint;
use crate::loom::loom_const_fn;
use crate::loom::sync::atomic::{AtomicI32, Ordering};
use crate::traits::{Lock, Semaphore};

/// A counting semaphore whose waiters spin.
///
/// The counter starts at the semaphore's capacity. Each [lock](Self::lock)
/// takes one unit, each [unlock](Self::unlock) gives one back. While
/// threads contend, the counter may briefly go negative.
///
/// # Example
/// ```no_run
/// use ftsync::SpinSemaphore;
/// use std::{sync::Arc, thread, time::Duration};
///
/// // At most two workers inside at any time
/// let semaphore = Arc::new(SpinSemaphore::with_capacity(2));
///
/// let workers = (0..5).map(|i| {
///     let sem = Arc::clone(&semaphore);
///     thread::spawn(move || {
///         sem.lock();
///         println!("Worker {i} inside");
///         thread::sleep(Duration::from_millis(100));
///         sem.unlock();
///     })
/// }).collect::<Vec<_>>();
///
/// for w in workers {
///     w.join().unwrap();
/// }
///
/// assert_eq!(semaphore.num_counters(), 2);
/// ```
pub struct SpinSemaphore {
    counter: AtomicI32,
}

impl SpinSemaphore {
    loom_const_fn! {
        /// Creates a new semaphore with a capacity of 1
        pub const fn new() -> Self {
            Self::with_capacity(1)
        }
    }

    loom_const_fn! {
        /// Creates a new semaphore with `capacity` units available
        pub const fn with_capacity(capacity: i32) -> Self {
            Self { counter: AtomicI32::new(capacity) }
        }
    }

    /// Makes a single attempt to take a unit.
    /// Returns false, without spinning, if none is available.
    pub fn try_lock(&self) -> bool {
        let prev = self.counter.fetch_sub(1, Ordering::Acquire);
        if prev > 0 {
            true
        } else {
            self.counter.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Takes a unit, spinning until one is available.
    ///
    /// After a failed attempt the thread only reads the counter until it
    /// sees a free unit, then retries the whole decrement, so a stale
    /// read never counts as an acquisition.
    pub fn lock(&self) {
        while !self.try_lock() {
            while self.counter.load(Ordering::Relaxed) < 1 {
                hint::spin_loop();
            }
        }
    }

    /// Gives a unit back, with release ordering.
    pub fn unlock(&self) {
        self.counter.fetch_add(1, Ordering::Release);
    }

    /// Adds `n` units of capacity
    pub fn add_counter(&self, n: i32) {
        self.counter.fetch_add(n, Ordering::Release);
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

impl Default for SpinSemaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for SpinSemaphore {
    fn lock(&self) {
        SpinSemaphore::lock(self)
    }

    fn try_lock(&self) -> bool {
        SpinSemaphore::try_lock(self)
    }

    unsafe fn unlock(&self) {
        SpinSemaphore::unlock(self)
    }
}

impl Semaphore for SpinSemaphore {
    fn add_counter(&self, n: i32) {
        SpinSemaphore::add_counter(self, n)
    }

    fn remove_counter(&self, n: i32) {
        SpinSemaphore::remove_counter(self, n)
    }

    fn num_counters(&self) -> i32 {
        SpinSemaphore::num_counters(self)
    }

    /* Nobody is ever parked on a spin semaphore, so there's nothing to wake */
    unsafe fn unlock_destroy_counter(&self) {}
}
