// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Checks wasm modules against the WASI shims.
#[derive(Clone, Debug, Parser)]
#[clap(name = "shim-check", version)]
pub struct Config {
    #[clap(subcommand)]
    pub command: Command,

    /// Logging format configuration.
    #[clap(long, global = true, value_enum, default_value_t = LoggingFormat::Text)]
    pub logging_format: LoggingFormat,

    /// Format of the report written to stdout.
    #[clap(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Report issues but exit successfully.
    #[clap(long, global = true)]
    pub allow_issues: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Print every shim and its signature.
    List,
    /// Classify the WASI imports of a module compiled against wasi-libc.
    Imports {
        /// Path to a wasm module or relocatable object.
        wasm: PathBuf,
    },
    /// Require that a linked artifact has no WASI imports left.
    Linked {
        /// Path to the final wasm32-unknown-unknown module.
        wasm: PathBuf,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum LoggingFormat {
    #[default]
    Text,
    Json,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
