/*  Copyright (C) 2025 Saúl Valdelvira
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, version 3.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>. */

//! Spin and OS-adaptive synchronization primitives
//!
//! Two families of primitives are provided:
//! - Spin primitives, whose waiters busy-poll. They have the lowest latency
//!   for very short critical sections and work in `no_std` environments:
//!   [SpinLock], [SpinSemaphore], [SpinSignal], [ReadWriteLock] and [Flag].
#![cfg_attr(
    feature = "std",
    doc = "- Adaptive primitives, which park their waiters in the OS: [AdaptiveLock], [AdaptiveSemaphore] and [Signal]."
)]
//!
//! Every lock and semaphore can be held through a [scoped guard](guard),
//! and the exclusive locks also back `lock_api` data wrappers like
//! [SpinMutex] and [RwLock].
//!
//! None of the primitives is reentrant, fair, or supports timeouts.
//!
//! # Examples
//! ## SpinMutex
//! ```
//! use ftsync::SpinMutex;
//!
//! static N: SpinMutex<u32> = SpinMutex::new(0);
//!
//! let threads = (0..10).map(|_|{
//!     std::thread::spawn(move || {
//!         let mut sync_n = N.lock();
//!         for _ in 0..10 {
//!             *sync_n += 1;
//!         }
//!     })
//! }).collect::<Vec<_>>();
//!
//! for t in threads {
//!     t.join().unwrap();
//! }
//!
//! assert_eq!(*N.lock(), 100);
//! ```
//!
//! ## Signal
//! ```
//! use ftsync::Signal;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let ready = Arc::new(Signal::new());
//!
//! let workers = (0..4).map(|_| {
//!     let ready = Arc::clone(&ready);
//!     thread::spawn(move || ready.wait())
//! }).collect::<Vec<_>>();
//!
//! /* A wake only reaches threads already waiting, so keep waking
//!  * until every worker went through */
//! while workers.iter().any(|w| !w.is_finished()) {
//!     ready.wake_all();
//!     thread::yield_now();
//! }
//!
//! for w in workers {
//!     w.join().unwrap();
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod loom;

pub mod traits;
pub use traits::{Flagging, Lock, Semaphore, Signaling};

pub mod spin;
pub use spin::SpinLock;

mod flag;
pub use flag::Flag;

mod semaphore;
pub use semaphore::SpinSemaphore;

mod spin_signal;
pub use spin_signal::SpinSignal;

pub mod rwlock;
pub use rwlock::ReadWriteLock;
#[cfg(not(loom))]
pub use rwlock::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(loom))]
pub mod mutex;
#[cfg(not(loom))]
pub use mutex::{SpinMutex, SpinMutexGuard};

pub mod guard;
pub use guard::{LockGuard, ReadGuard, SemaphoreDestroyCounterGuard, WriteGuard};

#[cfg(all(feature = "std", not(loom)))]
pub mod adaptive;
#[cfg(all(feature = "std", not(loom)))]
pub use adaptive::{AdaptiveLock, AdaptiveMutex, AdaptiveMutexGuard, AdaptiveSemaphore, Signal};
