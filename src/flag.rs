use crate::loom::loom_const_fn;
use crate::loom::sync::atomic::{AtomicBool, Ordering};
use crate::traits::Flagging;

/// An atomic boolean that can be raised and lowered from any thread.
///
/// A `Flag` has no blocking semantics, and gives no ordering guarantees
/// for memory other than the flag itself. It's not a substitute for a lock.
///
/// # Example
/// ```
/// use ftsync::Flag;
///
/// static SHUTDOWN: Flag = Flag::new();
///
/// std::thread::spawn(|| SHUTDOWN.raise()).join().unwrap();
/// assert!(SHUTDOWN.is_raised());
/// ```
pub struct Flag {
    raised: AtomicBool,
}

impl Flag {
    loom_const_fn! {
        /// Creates a new, lowered `Flag`
        pub const fn new() -> Self {
            Self { raised: AtomicBool::new(false) }
        }
    }

    /// Raises the flag
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Lowers the flag
    pub fn lower(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    /// Returns true if the flag is raised
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

impl Flagging for Flag {
    fn raise(&self) {
        Flag::raise(self)
    }

    fn lower(&self) {
        Flag::lower(self)
    }

    fn is_raised(&self) -> bool {
        Flag::is_raised(self)
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}
