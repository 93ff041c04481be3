//! Running futures so that a panic comes back as a value.
//!
//! [`run_safely`] turns any future into one that resolves to `Ok(output)` or,
//! if the future panics, to `Err(Panic)`. [`ensure_safe`] is for futures that
//! already promise to resolve to a `Result` and should never panic; it rescues
//! the ones that break that promise. Neither ever panics itself.
//!
//! Both introduce exactly one suspension point: the wrapped future. There is no
//! timeout and no cancellation; if the wrapped future never completes, neither does the runner.
//!
//! The global panic hook still runs when a panic is captured, so the usual
//! message is printed to stderr unless the caller installs a quieter hook.

use std::future::{Future, IntoFuture};
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::warn;

use crate::error::Rescued;
use crate::panic::Panic;

/// Output of [`run_safely`]: the future's output, or the panic it raised.
pub type SafeResult<V> = Result<V, Panic>;

/// A boxed operation that promises to resolve to a `Result` and never panic.
pub type SafeFuture<'a, V, E> = BoxFuture<'a, Result<V, E>>;

/// Label recorded when a [`Guard`] has none.
const ANONYMOUS: &str = "anonymous";

/// Drive `operation` to completion, capturing a panic as `Err`.
async fn capture<F>(operation: F) -> SafeResult<F::Output>
where
    F: IntoFuture,
{
    AssertUnwindSafe(operation.into_future())
        .catch_unwind()
        .await
        .map_err(Panic::new)
}

/// Build the future with `thunk` and drive it; a panic in either step is captured.
async fn capture_with<T, F>(thunk: T) -> SafeResult<F::Output>
where
    T: FnOnce() -> F,
    F: IntoFuture,
{
    let operation = std::panic::catch_unwind(AssertUnwindSafe(thunk)).map_err(Panic::from)?;
    capture(operation).await
}

/// Settings shared by the safe runners.
///
/// The free functions [`run_safely`] and [`ensure_safe`] use `Guard::default()`.
/// Build a guard when captured panics should be attributed in logs, or silenced:
///
/// ```
/// use resultkit_core::Guard;
///
/// # futures::executor::block_on(async {
/// let guard = Guard::new().with_label("load-profile");
/// let outcome = guard.run(async { 21 * 2 }).await;
/// assert_eq!(outcome.ok(), Some(42));
/// # });
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guard {
    label: Option<String>,
    quiet: bool,
}

impl Guard {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: None,
            quiet: false,
        }
    }

    /// Attach a label to every log record this guard emits.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Do not log captured panics.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Configured form of [`run_safely`].
    ///
    /// # Errors
    ///
    /// Resolves to `Err(Panic)` when `operation` panics.
    pub async fn run<F>(&self, operation: F) -> SafeResult<F::Output>
    where
        F: IntoFuture,
    {
        let outcome = capture(operation).await;
        if let Err(panic) = &outcome {
            self.log_captured(panic);
        }
        outcome
    }

    /// Configured form of [`run_safely_with`].
    ///
    /// # Errors
    ///
    /// Resolves to `Err(Panic)` when `thunk` or the future it builds panics.
    pub async fn run_with<T, F>(&self, thunk: T) -> SafeResult<F::Output>
    where
        T: FnOnce() -> F,
        F: IntoFuture,
    {
        let outcome = capture_with(thunk).await;
        if let Err(panic) = &outcome {
            self.log_captured(panic);
        }
        outcome
    }

    /// Configured form of [`ensure_safe`].
    ///
    /// # Errors
    ///
    /// Resolves to `Err(Rescued::Failed(e))` when `operation` resolves to
    /// `Err(e)`. When it panics, resolves to `Err(Rescued::Failed(fallback))`
    /// if a fallback was supplied, otherwise `Err(Rescued::Panicked(panic))`.
    pub async fn ensure<F, V, E>(&self, operation: F, fallback: Option<E>) -> Result<V, Rescued<E>>
    where
        F: IntoFuture<Output = Result<V, E>>,
    {
        match capture(operation).await {
            Ok(result) => result.map_err(Rescued::Failed),
            Err(panic) => {
                self.log_violation(&panic, fallback.is_some());
                Err(fallback.map_or(Rescued::Panicked(panic), Rescued::Failed))
            }
        }
    }

    /// Configured form of [`ensure_safe_or`].
    ///
    /// # Errors
    ///
    /// Resolves to the operation's own `Err(e)`, or to `Err(fallback)` when it panics.
    pub async fn ensure_or<F, V, E>(&self, operation: F, fallback: E) -> Result<V, E>
    where
        F: IntoFuture<Output = Result<V, E>>,
    {
        match capture(operation).await {
            Ok(result) => result,
            Err(panic) => {
                self.log_violation(&panic, true);
                Err(fallback)
            }
        }
    }

    fn log_captured(&self, panic: &Panic) {
        if self.quiet {
            return;
        }
        let label = self.label().unwrap_or(ANONYMOUS);
        warn!(label, %panic, "operation panicked; captured as an error value");
    }

    fn log_violation(&self, panic: &Panic, fallback: bool) {
        if self.quiet {
            return;
        }
        let label = self.label().unwrap_or(ANONYMOUS);
        warn!(
            label,
            %panic,
            fallback,
            "declared-safe operation panicked; contract violation rescued"
        );
    }
}

/// Await `operation`, resolving to `Ok(output)` or to `Err(Panic)` if it panics.
///
/// The output is never inspected: a future that itself resolves to a `Result`
/// yields `Ok(Ok(..))` or `Ok(Err(..))`, and a panic payload is kept as raised.
///
/// ```
/// use resultkit_core::run_safely;
///
/// # futures::executor::block_on(async {
/// let value = run_safely(async { "foo" }).await;
/// assert_eq!(value.ok(), Some("foo"));
/// # });
/// ```
///
/// # Errors
///
/// Resolves to `Err(Panic)` when `operation` panics.
pub async fn run_safely<F>(operation: F) -> SafeResult<F::Output>
where
    F: IntoFuture,
{
    Guard::new().run(operation).await
}

/// Like [`run_safely`], but takes a closure that builds the future.
///
/// A panic while building the future is captured the same way as a panic
/// while it runs.
///
/// # Errors
///
/// Resolves to `Err(Panic)` when `thunk` or the future it builds panics.
pub async fn run_safely_with<T, F>(thunk: T) -> SafeResult<F::Output>
where
    T: FnOnce() -> F,
    F: IntoFuture,
{
    Guard::new().run_with(thunk).await
}

/// Await a declared-safe `operation`, rescuing it if it panics anyway.
///
/// A completed operation's `Result` is passed through, with its error placed in
/// [`Rescued::Failed`]. If the operation panics, the `fallback` error wins when
/// one is given; otherwise the panic itself is returned.
///
/// # Errors
///
/// See [`Guard::ensure`].
pub async fn ensure_safe<F, V, E>(operation: F, fallback: Option<E>) -> Result<V, Rescued<E>>
where
    F: IntoFuture<Output = Result<V, E>>,
{
    Guard::new().ensure(operation, fallback).await
}

/// [`ensure_safe`] with a fallback that is always supplied, keeping the error type `E`.
///
/// # Errors
///
/// Resolves to the operation's own `Err(e)`, or to `Err(fallback)` when it panics.
pub async fn ensure_safe_or<F, V, E>(operation: F, fallback: E) -> Result<V, E>
where
    F: IntoFuture<Output = Result<V, E>>,
{
    Guard::new().ensure_or(operation, fallback).await
}

/// Method forms of the safe runners for any future.
pub trait SafeFutureExt: Future + Sized {
    /// See [`run_safely`].
    fn run_safely(self) -> impl Future<Output = SafeResult<Self::Output>> {
        run_safely(self)
    }

    /// See [`ensure_safe`].
    fn ensure_safe<V, E>(self, fallback: Option<E>) -> impl Future<Output = Result<V, Rescued<E>>>
    where
        Self: Future<Output = Result<V, E>>,
    {
        ensure_safe(self, fallback)
    }

    /// See [`ensure_safe_or`].
    fn ensure_safe_or<V, E>(self, fallback: E) -> impl Future<Output = Result<V, E>>
    where
        Self: Future<Output = Result<V, E>>,
    {
        ensure_safe_or(self, fallback)
    }
}

impl<F: Future> SafeFutureExt for F {}
