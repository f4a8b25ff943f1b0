//! Mutexes, providing unique syncronized access to a value

use crate::spin::SpinLock;

/// A mutex whose waiters spin, built on [SpinLock].
///
/// # Example
/// ```
/// use ftsync::SpinMutex;
///
/// static N: SpinMutex<u32> = SpinMutex::new(0);
///
/// let threads = (0..10).map(|_|{
///     std::thread::spawn(move || {
///         let mut sync_n = N.lock();
///         for _ in 0..10 {
///             *sync_n += 1;
///         }
///     })
/// }).collect::<Vec<_>>();
///
/// for t in threads {
///     t.join().unwrap();
/// }
///
/// assert_eq!(*N.lock(), 100);
/// ```
pub type SpinMutex<T> = lock_api::Mutex<SpinLock, T>;

/// Access to the data of a [SpinMutex]
pub type SpinMutexGuard<'a, T> = lock_api::MutexGuard<'a, SpinLock, T>;
