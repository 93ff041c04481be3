//! CLI command handlers.
//!
//! Every handler resolves to an exit code; failures of the demonstrated
//! operations are reported, never propagated.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use resultkit_core::{Either, Guard, SafeFuture, run_safely};

use crate::cli::Commands;

/// Reason reported when the safe operation has nothing to resolve with.
pub const UNDEFINED_VALUE: &str = "The value is undefined";

/// Execute a CLI command.
///
/// # Errors
///
/// Currently never fails; the signature leaves room for handlers with I/O.
pub async fn execute_command(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Double { value, fallback } => cmd_double(value, fallback).await,
        Commands::Safely { fail } => cmd_safely(fail).await,
    }
}

/// An operation declared safe that resolves with `value`.
///
/// Without a value it breaks its contract and panics instead of resolving
/// to an error.
#[must_use]
pub fn value_later(value: Option<i64>) -> SafeFuture<'static, i64, String> {
    Box::pin(async move {
        match value {
            Some(value) => Ok(value),
            None => std::panic::panic_any(UNDEFINED_VALUE),
        }
    })
}

/// Await [`value_later`] under `ensure_safe` and double what it yields.
///
/// # Errors
///
/// Returns the reason the value could not be produced: the fallback if one
/// was given, otherwise the message of the broken contract.
pub async fn double_later(value: Option<i64>, fallback: Option<String>) -> Result<i64, String> {
    let guard = Guard::new().with_label("value-later");
    let value = guard
        .ensure(value_later(value), fallback)
        .await
        .map_err(|rescued| match rescued.into_either() {
            Either::Left(error) => error,
            Either::Right(panic) => panic.message().unwrap_or("unknown").to_owned(),
        })?;

    value
        .checked_mul(2)
        .ok_or_else(|| format!("The value {value} is too large to double"))
}

async fn cmd_double(value: Option<i64>, fallback: Option<String>) -> Result<ExitCode> {
    match double_later(value, fallback).await {
        Ok(doubled) => {
            println!("The value multiplied by two is {doubled}");
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            info!(%reason, "value-later did not produce a value");
            eprintln!("Unable to get the value. Reason: {reason}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Report how a plain operation settled.
///
/// Always exits 0 and prints to stdout: a captured panic is the expected
/// outcome of `--fail`, not a failure of the command.
async fn cmd_safely(fail: bool) -> Result<ExitCode> {
    let outcome = run_safely(async move {
        if fail {
            std::panic::panic_any("requested failure");
        }
        "done"
    })
    .await;

    match outcome {
        Ok(value) => println!("Completed with value: {value}"),
        Err(panic) => println!("Captured as error: {panic}"),
    }
    Ok(ExitCode::SUCCESS)
}
