use crate::loom::hint;
use crate::loom::loom_const_fn;
use crate::loom::sync::atomic::{AtomicU8, Ordering, fence};
use crate::traits::Signaling;

const NOT_WAITING: u8 = 0;
const SIGNALLED: u8 = 1;
const WAITING: u8 = 2;

/// A single-slot signal whose waiter spins.
///
/// The whole state is one byte shared by every waiter, so this is meant
/// for a handshake between one waiting thread and one waking thread. A
/// [wake](Self::wake) issued while nobody waits is overwritten by the
/// next [wait](Self::wait), it is not queued.
///
/// # Example
/// ```
/// use ftsync::SpinSignal;
/// use std::sync::Arc;
/// use std::thread;
///
/// let signal = Arc::new(SpinSignal::new());
///
/// let s = Arc::clone(&signal);
/// let waker = thread::spawn(move || {
///     while !s.has_waiting_thread() {
///         std::hint::spin_loop();
///     }
///     s.wake();
/// });
///
/// signal.wait();
/// waker.join().unwrap();
/// ```
pub struct SpinSignal {
    state: AtomicU8,
}

impl SpinSignal {
    loom_const_fn! {
        /// Creates a new `SpinSignal`, with nobody waiting
        pub const fn new() -> Self {
            Self { state: AtomicU8::new(NOT_WAITING) }
        }
    }

    /// Spins until the signal is woken.
    ///
    /// The wait is satisfied either by a [wake](Self::wake), which only one
    /// spinning thread can consume, or by the slot going back to "not
    /// waiting" through [wake_all](Self::wake_all).
    pub fn wait(&self) {
        self.state.store(WAITING, Ordering::Release);
        loop {
            match self.state.load(Ordering::Relaxed) {
                SIGNALLED => {
                    /* Consume the wake. Other spinning threads keep waiting */
                    if self
                        .state
                        .compare_exchange(SIGNALLED, WAITING, Ordering::Acquire, Ordering::Relaxed)
                        .is_ok()
                    {
                        return;
                    }
                }
                NOT_WAITING => {
                    fence(Ordering::Acquire);
                    return;
                }
                _ => hint::spin_loop(),
            }
        }
    }

    /// Wakes at most one waiting thread
    pub fn wake(&self) {
        self.state.store(SIGNALLED, Ordering::Release);
    }

    /// Wakes every thread currently spinning in [wait](Self::wait)
    pub fn wake_all(&self) {
        self.state.store(NOT_WAITING, Ordering::Release);
    }

    /// Returns true if the slot isn't in the "not waiting" state
    pub fn has_waiting_thread(&self) -> bool {
        self.state.load(Ordering::Relaxed) != NOT_WAITING
    }
}

impl Default for SpinSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Signaling for SpinSignal {
    fn wait(&self) {
        SpinSignal::wait(self)
    }

    fn wake(&self) {
        SpinSignal::wake(self)
    }

    fn wake_all(&self) {
        SpinSignal::wake_all(self)
    }

    fn has_waiting_thread(&self) -> bool {
        SpinSignal::has_waiting_thread(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loom;
    use crate::loom::sync::Arc;
    use crate::loom::sync::atomic::AtomicBool;
    use crate::loom::thread;

    #[test]
    fn initial_state() {
        let signal = SpinSignal::default();
        assert!(!signal.has_waiting_thread());
        signal.wake();
        assert!(signal.has_waiting_thread());
        signal.wake_all();
        assert!(!signal.has_waiting_thread());
    }

    #[test]
    fn handshake() {
        loom::model(|| {
            let signal = Arc::new(SpinSignal::new());
            let data = Arc::new(AtomicBool::new(false));

            let s = signal.clone();
            let d = data.clone();
            let waker = thread::spawn(move || {
                while !s.has_waiting_thread() {
                    hint::spin_loop();
                }
                d.store(true, Ordering::Relaxed);
                s.wake();
            });

            signal.wait();
            /* The wake's release store publishes the write above */
            assert!(data.load(Ordering::Relaxed));
            waker.join().unwrap();
        });
    }

    #[test]
    fn wake_all_releases_waiter() {
        loom::model(|| {
            let signal = Arc::new(SpinSignal::new());

            let s = signal.clone();
            let waiter = thread::spawn(move || s.wait());

            while !signal.has_waiting_thread() {
                hint::spin_loop();
            }
            signal.wake_all();
            waiter.join().unwrap();
            assert!(!signal.has_waiting_thread());
        });
    }
}
