//! Capability traits shared by the primitives
//!
//! The [guards](crate::guard) are written against these traits, so any
//! lock or semaphore of this crate (or a foreign one implementing them)
//! can be held through RAII.

/// An object that grants exclusive (or counted) access.
///
/// Implemented by [SpinLock](crate::SpinLock), [SpinSemaphore](crate::SpinSemaphore)
/// and, with the `std` feature, by the adaptive lock and semaphore.
pub trait Lock {
    /// Acquires the object, blocking (spinning or parking) until it's available.
    fn lock(&self);

    /// Makes a single attempt to acquire the object.
    /// Returns true if it was acquired.
    fn try_lock(&self) -> bool;

    /// Releases the object.
    ///
    /// # Safety
    /// The caller must have previously acquired `self` with [lock](Self::lock)
    /// or a successful [try_lock](Self::try_lock), and not released it since.
    unsafe fn unlock(&self);
}

/// A counting [Lock], whose capacity can be adjusted.
pub trait Semaphore: Lock {
    /// Adds `n` units of capacity.
    fn add_counter(&self, n: i32);

    /// Removes `n` units of capacity. The counter may go negative, in which
    /// case `n` releases are needed before another acquire succeeds.
    fn remove_counter(&self, n: i32);

    /// Returns a snapshot of the available units.
    fn num_counters(&self) -> i32;

    /// Releases an acquisition without giving the unit back.
    ///
    /// Only the wake-up part of [unlock](Lock::unlock) is performed. This is
    /// meant for callers that previously removed a unit with
    /// [remove_counter](Self::remove_counter) and want to unwind a wait
    /// without restoring capacity.
    ///
    /// # Safety
    /// Same contract as [Lock::unlock].
    unsafe fn unlock_destroy_counter(&self);
}

/// An object threads can wait on until another thread wakes them.
pub trait Signaling {
    /// Blocks until woken by [wake](Self::wake) or [wake_all](Self::wake_all).
    fn wait(&self);

    /// Wakes one waiting thread, if any.
    fn wake(&self);

    /// Wakes every thread currently waiting.
    fn wake_all(&self);

    /// Returns true if some thread is currently waiting.
    ///
    /// This is a snapshot and may be out of date as soon as it returns.
    fn has_waiting_thread(&self) -> bool;
}

/// A boolean state that any thread can raise, lower or observe.
///
/// Implemented by [Flag](crate::Flag).
pub trait Flagging {
    /// Raises the flag.
    fn raise(&self);

    /// Lowers the flag.
    fn lower(&self);

    /// Returns true if the flag is raised.
    fn is_raised(&self) -> bool;
}
