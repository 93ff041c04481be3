//! Error values produced when a declared-safe operation is rescued.
//!
//! Nothing in this crate is ever re-raised; every failure is handed back as data.

use either::Either;
use thiserror::Error;

use crate::panic::Panic;

/// Failure returned by [`ensure_safe`](crate::ensure_safe).
///
/// A declared-safe operation can fail in two ways: it honours its contract and
/// resolves to `Err(e)`, or it breaks the contract by panicking. The second
/// case only surfaces as [`Rescued::Panicked`] when no fallback error was given.
#[derive(Debug, Error)]
pub enum Rescued<E> {
    /// The operation failed on its own terms, or a fallback error stood in
    /// for a contract violation.
    #[error("{0}")]
    Failed(E),

    /// The operation panicked and there was no fallback to substitute.
    #[error(transparent)]
    Panicked(Panic),
}

impl<E> Rescued<E> {
    #[inline]
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// The typed failure, if the operation did not panic.
    #[inline]
    #[must_use]
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Panicked(_) => None,
        }
    }

    /// The captured panic, if the operation broke its contract.
    #[inline]
    #[must_use]
    pub const fn panic(&self) -> Option<&Panic> {
        match self {
            Self::Failed(_) => None,
            Self::Panicked(panic) => Some(panic),
        }
    }

    /// Split into the typed failure (left) or the captured panic (right).
    #[inline]
    #[must_use]
    pub fn into_either(self) -> Either<E, Panic> {
        match self {
            Self::Failed(error) => Either::Left(error),
            Self::Panicked(panic) => Either::Right(panic),
        }
    }
}
