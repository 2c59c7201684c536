// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

//! The shim definitions themselves.
//!
//! Each symbol matches the `__imported_wasi_snapshot_preview1_*` declaration in
//! wasi-libc's `api.h`, which is what the libc objects reference at link time.
//! Arguments are handles, guest addresses and lengths, and are never read.
//!
//! Unmangled symbols can't be hidden on stable Rust, so a `cdylib` that links
//! this crate also exports every shim. On wasm32 that shows up as nine extra
//! exports of the final module, all but `sched_yield` trapping when called.
//! Consumers that need a fixed export list have to remove them after linking.

#![allow(clippy::missing_safety_doc)]

use crate::unreachable;

/// A WASI errno, as returned across the C ABI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Errno(pub i32);

pub const ERRNO_SUCCESS: Errno = Errno(0);

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_environ_get(
    _environ: i32,
    _environ_buf: i32,
) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_environ_sizes_get(
    _count_ptr: i32,
    _buf_size_ptr: i32,
) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_fd_close(_fd: i32) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_fd_fdstat_get(
    _fd: i32,
    _stat_ptr: i32,
) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_fd_read(
    _fd: i32,
    _iovecs_ptr: i32,
    _iovecs_len: i32,
    _nread_ptr: i32,
) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_fd_seek(
    _fd: i32,
    _offset: i64,
    _whence: i32,
    _filesize_ptr: i32,
) -> Errno {
    unreachable()
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_fd_write(
    _fd: i32,
    _iovecs_ptr: i32,
    _iovecs_len: i32,
    _nwritten_ptr: i32,
) -> Errno {
    unreachable()
}

/// Yielding is harmless to skip, so this one succeeds.
#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_sched_yield() -> Errno {
    ERRNO_SUCCESS
}

#[no_mangle]
pub unsafe extern "C" fn __imported_wasi_snapshot_preview1_proc_exit(_code: i32) -> ! {
    unreachable()
}
