use core::ptr;
use core::sync::atomic::AtomicU32;

use super::WaitChannel;

/// Parks threads with the Linux `futex(2)` syscall.
///
/// The channel itself holds no state, the kernel keys its wait queue by
/// the address of the token. Only process-private futexes are used.
#[derive(Debug, Default)]
pub struct Futex;

impl Futex {
    pub const fn new() -> Self {
        Futex
    }
}

impl WaitChannel for Futex {
    const INIT: Self = Futex;

    fn park(&self, token: &AtomicU32, expected: u32) {
        let r = unsafe {
            libc::syscall(
                libc::SYS_futex,
                token.as_ptr(),
                libc::FUTEX_WAIT | libc::FUTEX_PRIVATE_FLAG,
                expected,
                ptr::null::<libc::timespec>(),
            )
        };
        if r == -1 {
            let err = std::io::Error::last_os_error();
            match err.raw_os_error() {
                /* token changed before we slept, or a signal arrived */
                Some(libc::EAGAIN) | Some(libc::EINTR) => {}
                _ => tracing::debug!(%err, "futex wait failed"),
            }
        }
    }

    fn unpark_one(&self, token: &AtomicU32) {
        wake(token, 1);
    }

    fn unpark_all(&self, token: &AtomicU32) {
        wake(token, i32::MAX);
    }
}

fn wake(token: &AtomicU32, count: i32) {
    let r = unsafe {
        libc::syscall(
            libc::SYS_futex,
            token.as_ptr(),
            libc::FUTEX_WAKE | libc::FUTEX_PRIVATE_FLAG,
            count,
        )
    };
    if r == -1 {
        tracing::debug!(err = %std::io::Error::last_os_error(), "futex wake failed");
    } else if r > 0 {
        tracing::trace!(woken = r, "futex wake");
    }
}
