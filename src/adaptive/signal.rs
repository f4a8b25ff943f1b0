use core::sync::atomic::{AtomicU32, Ordering};

use super::channel::{NativeChannel, WaitChannel};
use crate::traits::Signaling;

/// A blocking signal that wakes one or all of its waiting threads.
///
/// Every call to [wait](Self::wait) parks the thread until a later
/// [wake](Self::wake) or [wake_all](Self::wake_all) releases it. Wakes
/// are only delivered to threads already waiting: waking a `Signal` that
/// nobody waits on does nothing, and is not remembered for future waiters.
///
/// # Example
/// ```
/// use ftsync::Signal;
/// use std::sync::Arc;
/// use std::thread;
///
/// let signal = Arc::new(Signal::new());
///
/// let s = Arc::clone(&signal);
/// let waiter = thread::spawn(move || s.wait());
///
/// while !signal.has_waiting_thread() {
///     thread::yield_now();
/// }
/// signal.wake();
/// waiter.join().unwrap();
/// assert!(!signal.has_waiting_thread());
/// ```
pub struct Signal<C = NativeChannel> {
    /// Ticket handed to the next thread that starts waiting
    next_ticket: AtomicU32,
    /// Number of tickets released so far. Also the wait token.
    released: AtomicU32,
    channel: C,
}

/// Returns true if ticket counter `a` is past `b`, across wrap-around.
#[inline]
fn is_ahead(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) > 0
}

impl Signal {
    /// Creates a new `Signal` on the native wait channel
    pub const fn new() -> Self {
        Self::with_channel(NativeChannel::INIT)
    }
}

impl<C: WaitChannel> Signal<C> {
    /// Creates a new `Signal` parking through `channel`
    pub const fn with_channel(channel: C) -> Self {
        Self {
            next_ticket: AtomicU32::new(0),
            released: AtomicU32::new(0),
            channel,
        }
    }

    /// Blocks until woken by [wake](Self::wake) or [wake_all](Self::wake_all).
    ///
    /// Only wakes issued after this call registered the thread release it.
    pub fn wait(&self) {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);
        loop {
            let released = self.released.load(Ordering::Acquire);
            if is_ahead(released, ticket) {
                return;
            }
            tracing::trace!(ticket, "waiting on signal, parking");
            self.channel.park(&self.released, released);
        }
    }

    /// Wakes one waiting thread. Does nothing if nobody waits.
    ///
    /// Waiters are released in the order they started waiting.
    pub fn wake(&self) {
        let woke = self
            .released
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |released| {
                let next = self.next_ticket.load(Ordering::SeqCst);
                is_ahead(next, released).then_some(released.wrapping_add(1))
            })
            .is_ok();
        if woke {
            /* Every waiter parks on the same token, so the one holding the
             * released ticket can't be singled out */
            self.channel.unpark_all(&self.released);
        }
    }

    /// Wakes every thread waiting right now. Does nothing if nobody waits.
    pub fn wake_all(&self) {
        let next = self.next_ticket.load(Ordering::SeqCst);
        if let Ok(released) = self
            .released
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |released| {
                is_ahead(next, released).then_some(next)
            })
        {
            tracing::trace!(waiters = next.wrapping_sub(released), "waking all signal waiters");
            self.channel.unpark_all(&self.released);
        }
    }

    /// Returns true if some thread waits and hasn't been woken yet
    pub fn has_waiting_thread(&self) -> bool {
        self.num_waiting() != 0
    }

    fn num_waiting(&self) -> u32 {
        /* `released` never passes `next_ticket`, so read it first */
        let released = self.released.load(Ordering::SeqCst);
        self.next_ticket.load(Ordering::SeqCst).wrapping_sub(released)
    }
}

impl<C: WaitChannel> Default for Signal<C> {
    fn default() -> Self {
        Self::with_channel(C::INIT)
    }
}

impl<C: WaitChannel> Signaling for Signal<C> {
    fn wait(&self) {
        Signal::wait(self)
    }

    fn wake(&self) {
        Signal::wake(self)
    }

    fn wake_all(&self) {
        Signal::wake_all(self)
    }

    fn has_waiting_thread(&self) -> bool {
        Signal::has_waiting_thread(self)
    }
}
