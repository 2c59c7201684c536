// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

//! A static description of every shim, for tooling that inspects wasm modules.

use core::fmt;

/// The import module wasi-libc places its syscalls in.
pub const MODULE: &str = "wasi_snapshot_preview1";

/// The prefix wasi-libc gives the linker symbol of each import.
pub const SYMBOL_PREFIX: &str = "__imported_wasi_snapshot_preview1_";

/// The wasm value types that appear in shim signatures.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ValueType {
    I32,
    I64,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
        }
    }
}

/// What a shim does if it's ever called.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Behavior {
    /// Traps.
    Unreachable,
    /// Declared never-returning, and traps.
    NoReturn,
    /// Returns `ERRNO_SUCCESS` without doing anything.
    Success,
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "unreachable"),
            Self::NoReturn => write!(f, "no-return"),
            Self::Success => write!(f, "success"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImportStub {
    /// The import's field name within [`MODULE`].
    pub name: &'static str,
    /// The linker symbol the shim is exported under.
    pub symbol: &'static str,
    pub params: &'static [ValueType],
    pub results: &'static [ValueType],
    pub behavior: Behavior,
}

impl ImportStub {
    /// Whether a wasm function type matches this shim's signature.
    pub fn matches(&self, params: &[ValueType], results: &[ValueType]) -> bool {
        self.params == params && self.results == results
    }
}

impl fmt::Display for ImportStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", MODULE, self.name)?;
        write_types(f, self.params)?;
        write!(f, " -> ")?;
        write_types(f, self.results)
    }
}

/// Formats a type list the way the text format writes it, e.g. `(i32, i64)`.
pub fn write_types<T: fmt::Display>(f: &mut impl fmt::Write, types: &[T]) -> fmt::Result {
    write!(f, "(")?;
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{ty}")?;
    }
    write!(f, ")")
}

macro_rules! stub {
    ($name:literal, [$($param:ident),*], [$($result:ident),*], $behavior:ident) => {
        ImportStub {
            name: $name,
            symbol: concat!("__imported_wasi_snapshot_preview1_", $name),
            params: &[$(ValueType::$param),*],
            results: &[$(ValueType::$result),*],
            behavior: Behavior::$behavior,
        }
    };
}

/// Every import this crate defines, in wasi-libc's declaration order.
pub const STUBS: &[ImportStub] = &[
    stub!("environ_get", [I32, I32], [I32], Unreachable),
    stub!("environ_sizes_get", [I32, I32], [I32], Unreachable),
    stub!("fd_close", [I32], [I32], Unreachable),
    stub!("fd_fdstat_get", [I32, I32], [I32], Unreachable),
    stub!("fd_read", [I32, I32, I32, I32], [I32], Unreachable),
    stub!("fd_seek", [I32, I64, I32, I32], [I32], Unreachable),
    stub!("fd_write", [I32, I32, I32, I32], [I32], Unreachable),
    stub!("sched_yield", [], [I32], Success),
    stub!("proc_exit", [I32], [], NoReturn),
];

/// Finds the shim for an import of [`MODULE`] by field name.
pub fn lookup(name: &str) -> Option<&'static ImportStub> {
    STUBS.iter().find(|stub| stub.name == name)
}
