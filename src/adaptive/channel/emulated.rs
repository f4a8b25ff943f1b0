use core::sync::atomic::{AtomicU32, Ordering};

use parking_lot::{Condvar, Mutex};

use super::WaitChannel;

/// Parks threads on a condition variable guarded by a blocking mutex.
///
/// This stands in for a kernel wait queue where none is available. The
/// token is compared while holding the mutex, and unparking takes the
/// mutex before notifying, so a waiter can't miss a wake between its
/// check and its sleep.
#[derive(Debug, Default)]
pub struct Emulated {
    lock: Mutex<()>,
    cvar: Condvar,
}

impl Emulated {
    pub const fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            cvar: Condvar::new(),
        }
    }
}

impl WaitChannel for Emulated {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    fn park(&self, token: &AtomicU32, expected: u32) {
        let mut guard = self.lock.lock();
        if token.load(Ordering::SeqCst) == expected {
            self.cvar.wait(&mut guard);
        }
    }

    fn unpark_one(&self, _token: &AtomicU32) {
        drop(self.lock.lock());
        self.cvar.notify_one();
    }

    fn unpark_all(&self, _token: &AtomicU32) {
        drop(self.lock.lock());
        self.cvar.notify_all();
    }
}
