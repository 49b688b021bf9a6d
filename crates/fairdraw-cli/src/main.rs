//! Fairdraw command-line binary.
//!
//! # Usage
//!
//! ```bash
//! # Publish a commitment before play
//! fairdraw commit 3f9a...
//!
//! # Place 3 mines on a 25-cell grid
//! fairdraw mines --server-seed 3f9a... --client-seed lucky --nonce 7 --mines 3 --grid 25
//!
//! # Audit after the seed is revealed
//! fairdraw verify 3f9a... 09b7ecc0...
//! ```

use std::{io, process::ExitCode};

use clap::Parser;
use fairdraw_cli::{Cli, Status, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::debug!(command = ?cli.command, "fairdraw starting");

    let status = run(&cli, &mut io::stdout().lock())?;

    Ok(match status {
        Status::Success => ExitCode::SUCCESS,
        Status::Mismatch => ExitCode::FAILURE,
    })
}
