//! # resultkit - demo entry point
//!
//! Runs one of the demo commands and exits with its code.
//!
//! ## Panic hook
//!
//! The demonstrated operations panic on purpose. The default panic hook is
//! replaced with one that records the panic as a tracing event, so captured
//! panics do not also print a backtrace notice on stderr.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use resultkit::cli::Cli;
use resultkit::commands::execute_command;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    init_panic_hook();

    let cli = Cli::parse();
    debug!(?cli, "parsed command line");

    execute_command(cli.command).await
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Route panic reports through tracing instead of stderr.
fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        debug!(%info, "panic raised");
    }));
}
