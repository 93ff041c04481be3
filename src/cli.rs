//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use clap::{Parser, Subcommand};

/// resultkit - async failures as values
#[derive(Parser, Debug)]
#[command(name = "resultkit")]
#[command(version)]
#[command(about = "Demonstrates capturing failing async operations as explicit results")]
#[command(
    long_about = "Runs small async operations through resultkit's safe runners and reports whether each resolved to a value or was captured as an error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a value from an operation declared safe and print it doubled
    Double {
        /// Value the operation resolves with; without it the operation breaks its contract
        #[arg(short, long)]
        value: Option<i64>,

        /// Error reported instead of the original one when the operation panics
        #[arg(short, long)]
        fallback: Option<String>,
    },

    /// Run a plain operation and report how it settled
    Safely {
        /// Make the operation panic instead of completing
        #[arg(long, default_value_t = false)]
        fail: bool,
    },
}
