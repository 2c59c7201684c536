// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

//! Link-time shims for the [WASI Preview 1][Wasi] imports pulled in by wasi-libc.
//!
//! C and C++ code compiled with the WASI SDK references a handful of
//! `wasi_snapshot_preview1` host functions from libc's environment initializer
//! and stdio, even when the program never touches the environment or a file
//! descriptor. Linking that code into a `wasm32-unknown-unknown` artifact
//! leaves those imports unresolved. This crate defines each one under the
//! symbol wasi-libc declares, so the final module has no WASI imports.
//!
//! None of the shims are meant to run. All but `sched_yield` trap if reached.
//!
//! # Linking
//!
//! rustc only links a dependency that the Rust side names somewhere. The shims
//! are referenced from C objects, never from Rust, so the crate that pulls in
//! the WASI-built C code must name this one explicitly:
//!
//! ```
//! use wasi_shim as _;
//!
//! extern "C" {
//!     fn __imported_wasi_snapshot_preview1_sched_yield() -> i32;
//! }
//!
//! assert_eq!(unsafe { __imported_wasi_snapshot_preview1_sched_yield() }, 0);
//! ```
//!
//! Without the `use`, the link fails with undefined
//! `__imported_wasi_snapshot_preview1_*` symbols.
//!
//! [Wasi]: https://github.com/WebAssembly/WASI/blob/main/legacy/preview1/docs.md

#![cfg_attr(target_arch = "wasm32", no_std)]

pub use imports::{lookup, Behavior, ImportStub, ValueType, MODULE, STUBS, SYMBOL_PREFIX};
pub use wasip1_shim::{Errno, ERRNO_SUCCESS};

pub mod imports;
pub mod wasip1_shim;

/// Marks a path that must never execute.
///
/// On wasm32 this is the `unreachable` instruction, which traps. Elsewhere the
/// process aborts. With the `assume-unreachable` feature the path is instead
/// handed to the optimizer as dead code, matching `__builtin_unreachable`.
#[inline(always)]
pub(crate) fn unreachable() -> ! {
    #[cfg(feature = "assume-unreachable")]
    unsafe {
        core::hint::unreachable_unchecked()
    }

    #[cfg(all(not(feature = "assume-unreachable"), target_arch = "wasm32"))]
    core::arch::wasm32::unreachable();

    #[cfg(all(not(feature = "assume-unreachable"), not(target_arch = "wasm32")))]
    std::process::abort();
}
