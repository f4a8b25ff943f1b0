//! Primitives that park blocked threads in the operating system
//!
//! Unlike the spin primitives, a thread waiting on one of these gives its
//! CPU back to the scheduler until it's woken. How the thread is parked
//! is decided by a [WaitChannel], chosen once per build (see [channel]).

pub mod channel;
mod lock;
mod semaphore;
mod signal;

pub use channel::{Backend, NATIVE_BACKEND, NativeChannel, WaitChannel};
pub use lock::AdaptiveLock;
pub use semaphore::AdaptiveSemaphore;
pub use signal::Signal;

/// A mutex owning the data it protects, built on [AdaptiveLock]
pub type AdaptiveMutex<T> = lock_api::Mutex<AdaptiveLock, T>;
/// Access to the data of an [AdaptiveMutex]
pub type AdaptiveMutexGuard<'a, T> = lock_api::MutexGuard<'a, AdaptiveLock, T>;
