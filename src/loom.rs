// Copyright 2025. Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Indirection over the atomics used by the spin primitives, so the
//! same code can be model-checked with `loom` (`RUSTFLAGS="--cfg loom"`).

cfg_if::cfg_if! {
    if #[cfg(loom)] {
        pub(crate) use loom::sync;
        pub(crate) use loom::hint;

        #[cfg(test)]
        pub(crate) use loom::{model, thread};
    } else {
        pub(crate) use core::hint;

        #[cfg(test)]
        pub(crate) use std::thread;

        #[cfg(test)]
        #[inline(always)]
        pub(crate) fn model<F>(f: F)
        where
            F: Fn() + Sync + Send + 'static,
        {
            f()
        }

        pub(crate) mod sync {
            pub(crate) use core::sync::*;

            #[cfg(test)]
            pub(crate) use std::sync::*;
        }
    }
}

/// Declares a `const fn` that loses its `const`-ness under `loom`, whose
/// atomics can't be built in const context.
macro_rules! loom_const_fn {
    (
        $(#[$meta:meta])*
        $vis:vis const fn $name:ident($($arg:ident: $T:ty),*) -> $Ret:ty $body:block
    ) => {
        $(#[$meta])*
        #[cfg(not(loom))]
        $vis const fn $name($($arg: $T),*) -> $Ret $body

        $(#[$meta])*
        #[cfg(loom)]
        #[inline]
        $vis fn $name($($arg: $T),*) -> $Ret $body
    };
}

pub(crate) use loom_const_fn;
