//! resultkit-core - explicit success/failure values for async code.
//!
//! Two pieces:
//!
//! - The result algebra ([`make_result`], [`make_error`], [`is_result`],
//!   [`is_error`], [`unwrap`]) over `std::result::Result`.
//! - Safe runners ([`run_safely`], [`ensure_safe`]) that await a future and
//!   hand back a panic as an error value instead of letting it unwind.
//!
//! # Example
//!
//! ```rust
//! use resultkit_core::{ensure_safe_or, is_error, run_safely};
//!
//! # futures::executor::block_on(async {
//! // A plain future: its output is the value, a panic would be the error.
//! let doubled = run_safely(async { 21 * 2 }).await;
//! assert_eq!(doubled.ok(), Some(42));
//!
//! // A future that promises to resolve to a Result and never panic.
//! let lookup = async { Err::<u32, _>("missing") };
//! let outcome = ensure_safe_or(lookup, "unavailable").await;
//! assert!(is_error(&outcome));
//! # });
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod error;
mod panic;
mod result;
mod safe;

#[cfg(test)]
mod testing;

pub use error::Rescued;
pub use panic::Panic;
pub use result::{
    NeverFails, OutcomeExt, into_inner, is_error, is_result, make_error, make_result, unwrap,
};
pub use safe::{
    Guard, SafeFuture, SafeFutureExt, SafeResult, ensure_safe, ensure_safe_or, run_safely,
    run_safely_with,
};

pub use either::Either;
