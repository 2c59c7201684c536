// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

use clap::Parser;
use eyre::Result;
use shim_check::{config::Config, logging};
use std::process;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.logging_format)?;

    if !shim_check::run_stdout(&config)? {
        process::exit(1);
    }
    Ok(())
}
