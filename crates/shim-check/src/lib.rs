// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

//! Host-side checks that a wasm build links cleanly against `wasi-shim`.

use config::{Command, Config, OutputFormat};
use eyre::Result;
use module::ModuleImports;
use report::Report;
use std::io::{self, Write};
use tracing::info;

pub mod config;
pub mod logging;
pub mod module;
pub mod report;

/// Runs the configured command, writing its report to `out`.
/// Returns whether the process should exit successfully.
pub fn run(config: &Config, out: &mut impl Write) -> Result<bool> {
    let report = match &config.command {
        Command::List => {
            match config.output {
                OutputFormat::Text => report::write_stubs_text(out)?,
                OutputFormat::Json => report::write_stubs_json(out)?,
            }
            return Ok(true);
        }
        Command::Imports { wasm } => {
            info!("checking WASI imports of {}", wasm.display());
            Report::imports(&ModuleImports::from_path(wasm)?)
        }
        Command::Linked { wasm } => {
            info!("checking linked artifact {}", wasm.display());
            Report::linked(&ModuleImports::from_path(wasm)?)
        }
    };

    match config.output {
        OutputFormat::Text => write!(out, "{report}")?,
        OutputFormat::Json => report.write_json(out)?,
    }
    Ok(report.is_clean() || config.allow_issues)
}

/// Like [`run`], writing to stdout.
pub fn run_stdout(config: &Config) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let clean = run(config, &mut out)?;
    out.flush()?;
    Ok(clean)
}
