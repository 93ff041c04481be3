#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # resultkit
//!
//! Explicit success/failure values for async Rust.
//!
//! This library re-exports `resultkit-core` and hosts the command handlers of
//! the `resultkit` demo binary.

pub use resultkit_core;

pub mod cli;
pub mod commands;
