//! OS wait channels
//!
//! A wait channel parks a thread on a 32-bit wait token until another
//! thread wakes it. It's the only place where the adaptive primitives
//! touch the operating system.
//!
//! Three backends exist:
//! - [Futex] on Linux and Android, through the `futex` syscall.
//! - [WaitOnAddress] on Windows.
//! - [Emulated] everywhere, a mutex and condition variable standing in
//!   for the kernel.
//!
//! [NativeChannel] is the backend picked for the current build. Enabling
//! the `emulated-wait` feature forces [Emulated].

use core::sync::atomic::AtomicU32;

mod emulated;
pub use emulated::Emulated;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod futex;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use futex::Futex;

#[cfg(windows)]
mod wait_on_address;
#[cfg(windows)]
pub use wait_on_address::WaitOnAddress;

/// A way of putting threads to sleep on a wait token.
///
/// # Contract
/// - [park](Self::park) only sleeps if `token` still holds `expected`, and
///   that check is atomic with respect to [unpark_one](Self::unpark_one)
///   and [unpark_all](Self::unpark_all). It may return spuriously.
/// - Callers change `token` before calling an unpark function, so a
///   waiter that checked the old value is guaranteed to be woken.
pub trait WaitChannel: Sync {
    /// A channel with nobody parked on it
    const INIT: Self;

    /// Blocks the calling thread while `token` holds `expected`.
    fn park(&self, token: &AtomicU32, expected: u32);

    /// Wakes one thread parked on `token`.
    fn unpark_one(&self, token: &AtomicU32);

    /// Wakes every thread parked on `token`.
    fn unpark_all(&self, token: &AtomicU32);
}

/// The blocking strategy a [WaitChannel] uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Linux `futex(2)`
    Futex,
    /// Win32 `WaitOnAddress`
    WaitOnAddress,
    /// Mutex and condition variable
    Emulated,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "emulated-wait")] {
        /// The wait channel used by default by the adaptive primitives
        pub type NativeChannel = Emulated;
        /// The backend of [NativeChannel]
        pub const NATIVE_BACKEND: Backend = Backend::Emulated;
    } else if #[cfg(any(target_os = "linux", target_os = "android"))] {
        /// The wait channel used by default by the adaptive primitives
        pub type NativeChannel = Futex;
        /// The backend of [NativeChannel]
        pub const NATIVE_BACKEND: Backend = Backend::Futex;
    } else if #[cfg(windows)] {
        /// The wait channel used by default by the adaptive primitives
        pub type NativeChannel = WaitOnAddress;
        /// The backend of [NativeChannel]
        pub const NATIVE_BACKEND: Backend = Backend::WaitOnAddress;
    } else {
        /// The wait channel used by default by the adaptive primitives
        pub type NativeChannel = Emulated;
        /// The backend of [NativeChannel]
        pub const NATIVE_BACKEND: Backend = Backend::Emulated;
    }
}
