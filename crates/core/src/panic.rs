//! Opaque payload of an operation that terminated abnormally.
//!
//! A panicking future hands back whatever value was passed to `panic!` or
//! `std::panic::panic_any`. The payload is kept exactly as it was raised:
//! it is never stringified or re-typed, only viewed.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// The payload captured from a panicking operation.
///
/// Inspect it with [`Panic::message`] for the common string payloads, or
/// recover the original value with [`Panic::downcast`].
///
/// The payload sits behind a mutex so that `Panic` is `Send + Sync` and can be
/// raised into `anyhow::Error` or `Box<dyn Error + Send + Sync>`. The message
/// view and the payload type are read once, when the panic is wrapped.
pub struct Panic {
    payload: Mutex<Box<dyn Any + Send>>,
    message: Option<String>,
    type_id: TypeId,
}

impl Panic {
    /// Wrap a raw unwind payload.
    #[must_use]
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|message| (*message).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        let type_id = (*payload).type_id();
        Self {
            payload: Mutex::new(payload),
            message,
            type_id,
        }
    }

    /// Borrow the payload as text when it was raised as `&'static str` or `String`.
    ///
    /// This is what `panic!("...")` and `panic!("{}", ..)` produce.
    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the payload is of type `T`.
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Run `f` on the payload if it is a `T`.
    pub fn with_ref<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let payload = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        payload.downcast_ref::<T>().map(f)
    }

    /// Borrow the payload mutably if it is a `T`. Exclusive access needs no locking.
    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .downcast_mut::<T>()
    }

    /// Take the payload out as a `T`.
    ///
    /// # Errors
    ///
    /// Hands `self` back unchanged when the payload is not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        self.into_inner()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(Self::new)
    }

    /// Give up the wrapper and return the raw unwind payload.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.payload
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Box<dyn Any + Send>> for Panic {
    #[inline]
    fn from(payload: Box<dyn Any + Send>) -> Self {
        Self::new(payload)
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "operation panicked: {message}"),
            None => f.write_str("operation panicked with a non-string payload"),
        }
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl std::error::Error for Panic {}
