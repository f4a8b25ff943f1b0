use core::ffi::c_void;
use core::sync::atomic::AtomicU32;

use windows_sys::Win32::System::Threading::{
    INFINITE, WaitOnAddress as SysWaitOnAddress, WakeByAddressAll, WakeByAddressSingle,
};

use super::WaitChannel;

/// Parks threads with the Win32 `WaitOnAddress` family.
///
/// Like a futex, the wait queue is keyed by the token's address, so the
/// channel holds no state.
#[derive(Debug, Default)]
pub struct WaitOnAddress;

impl WaitOnAddress {
    pub const fn new() -> Self {
        WaitOnAddress
    }
}

impl WaitChannel for WaitOnAddress {
    const INIT: Self = WaitOnAddress;

    fn park(&self, token: &AtomicU32, expected: u32) {
        let ok = unsafe {
            SysWaitOnAddress(
                token.as_ptr().cast::<c_void>(),
                (&expected as *const u32).cast::<c_void>(),
                size_of::<u32>(),
                INFINITE,
            )
        };
        if ok == 0 {
            tracing::debug!(err = %std::io::Error::last_os_error(), "WaitOnAddress failed");
        }
    }

    fn unpark_one(&self, token: &AtomicU32) {
        unsafe { WakeByAddressSingle(token.as_ptr().cast::<c_void>()) }
    }

    fn unpark_all(&self, token: &AtomicU32) {
        unsafe { WakeByAddressAll(token.as_ptr().cast::<c_void>()) }
    }
}
