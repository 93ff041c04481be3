//! Construction, inspection and unwrapping of success/failure values.
//!
//! The two-shaped result is `std::result::Result`: `Ok(value)` is the success
//! shape and `Err(error)` the failure shape. Being a sum type, a result always
//! holds exactly one of the two; there is no "neither" state to guard against.
//!
//! # Examples
//!
//! ```
//! use resultkit_core::{Either, is_error, is_result, make_error, make_result, unwrap};
//!
//! let found: Result<u32, String> = make_result(7);
//! assert!(is_result(&found));
//! assert!(!is_error(&found));
//! assert_eq!(unwrap(found), Either::Left(7));
//!
//! let missing: Result<u32, String> = make_error("not found".to_string());
//! assert!(is_error(&missing));
//! assert_eq!(unwrap(missing), Either::Right("not found".to_string()));
//! ```

use std::convert::Infallible;
use std::fmt::Display;

use either::Either;

/// Build the success shape. Any value is accepted, including `()`.
#[inline]
pub const fn make_result<V, E>(value: V) -> Result<V, E> {
    Ok(value)
}

/// Build the failure shape. The error is stored as given.
#[inline]
pub const fn make_error<V, E>(error: E) -> Result<V, E> {
    Err(error)
}

/// True iff `result` holds a value.
#[inline]
#[must_use]
pub const fn is_result<V, E>(result: &Result<V, E>) -> bool {
    matches!(result, Ok(_))
}

/// True iff `result` holds an error.
#[inline]
#[must_use]
pub const fn is_error<V, E>(result: &Result<V, E>) -> bool {
    matches!(result, Err(_))
}

/// Take whichever payload is present: the value on the left, the error on the right.
#[inline]
pub fn unwrap<V, E>(result: Result<V, E>) -> Either<V, E> {
    match result {
        Ok(value) => Either::Left(value),
        Err(error) => Either::Right(error),
    }
}

/// Take the payload of a result whose value and error share one type.
#[inline]
pub fn into_inner<T>(result: Result<T, T>) -> T {
    match result {
        Ok(payload) | Err(payload) => payload,
    }
}

/// Method forms of the free functions above, plus a logged fallback.
pub trait OutcomeExt<V, E> {
    /// True iff this holds a value.
    fn is_result(&self) -> bool;

    /// True iff this holds an error.
    fn is_error(&self) -> bool;

    /// Borrow whichever payload is present.
    fn payload(&self) -> Either<&V, &E>;

    /// Take whichever payload is present.
    fn into_payload(self) -> Either<V, E>;

    /// Get the value, or log the error and return `fallback`.
    fn or_fallback_logged(self, fallback: V) -> V
    where
        E: Display;
}

impl<V, E> OutcomeExt<V, E> for Result<V, E> {
    #[inline]
    fn is_result(&self) -> bool {
        is_result(self)
    }

    #[inline]
    fn is_error(&self) -> bool {
        is_error(self)
    }

    #[inline]
    fn payload(&self) -> Either<&V, &E> {
        unwrap(self.as_ref())
    }

    #[inline]
    fn into_payload(self) -> Either<V, E> {
        unwrap(self)
    }

    fn or_fallback_logged(self, fallback: V) -> V
    where
        E: Display,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Operation failed, using fallback: {}", e);
                fallback
            }
        }
    }
}

/// Results whose error type is uninhabited.
///
/// `Result<V, Infallible>` can only ever be `Ok`, so the value is reachable
/// without a failure branch.
pub trait NeverFails<V> {
    /// Take the value; there is no error to handle.
    fn into_value(self) -> V;
}

impl<V> NeverFails<V> for Result<V, Infallible> {
    #[inline]
    fn into_value(self) -> V {
        match self {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}
