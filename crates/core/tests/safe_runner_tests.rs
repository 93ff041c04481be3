//! Behaviour tests for the safe runners.
//!
//! Each test awaits an operation that either completes or panics, and checks
//! that the runner resolves to the expected success/failure value.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use resultkit_core::{
    Guard, Panic, Rescued, SafeFuture, ensure_safe, ensure_safe_or, is_error, is_result, make_error,
    make_result, run_safely, run_safely_with,
};

/// An operation that panics with `payload` instead of completing.
async fn rejects_with<V, P: std::any::Any + Send>(payload: P) -> V {
    std::panic::panic_any(payload)
}

/// An operation that claims to be safe but panics when no value is available.
fn value_later(value: Option<i64>) -> SafeFuture<'static, i64, String> {
    Box::pin(async move {
        match value {
            Some(value) => Ok(value),
            None => std::panic::panic_any("The value is undefined"),
        }
    })
}

#[tokio::test]
async fn test_run_safely_given_resolving_operation() {
    let outcome = run_safely(async { "foo" }).await;

    assert!(is_result(&outcome));
    assert_eq!(outcome.unwrap(), "foo");
}

#[tokio::test]
async fn test_run_safely_given_panicking_operation() {
    let outcome = run_safely(rejects_with::<&str, _>("foo")).await;

    assert!(is_error(&outcome));
    assert_eq!(outcome.unwrap_err().message(), Some("foo"));
}

#[tokio::test]
async fn test_run_safely_does_not_flatten_resolved_result() {
    let operation = async { make_result::<&str, &str>("foo") };

    let outcome = run_safely(operation).await;

    assert_eq!(outcome.unwrap(), Ok("foo"));
}

#[tokio::test]
async fn test_run_safely_does_not_flatten_panicked_result() {
    let payload: Result<(), &'static str> = make_error("foo");

    let outcome = run_safely(rejects_with::<String, _>(payload)).await;

    let panic = outcome.unwrap_err();
    assert_eq!(
        panic.downcast::<Result<(), &'static str>>().unwrap(),
        Err("foo")
    );
}

#[tokio::test]
async fn test_run_safely_keeps_structured_payload() {
    #[derive(Debug, PartialEq)]
    struct Refused {
        code: u16,
    }

    let outcome = run_safely(rejects_with::<(), _>(Refused { code: 503 })).await;

    let panic = outcome.unwrap_err();
    assert!(panic.message().is_none());
    assert_eq!(panic.with_ref(|refused: &Refused| refused.code), Some(503));
    assert_eq!(panic.downcast::<Refused>().unwrap(), Refused { code: 503 });
}

#[tokio::test]
async fn test_run_safely_with_runs_thunk_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let outcome = run_safely_with(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { 10_u32 }
    })
    .await;

    assert_eq!(outcome.unwrap(), 10);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ensure_safe_passes_value_through() {
    let outcome = ensure_safe(value_later(Some(4)), None).await;

    assert_eq!(outcome.unwrap(), 4);
}

#[tokio::test]
async fn test_ensure_safe_rescues_without_fallback() {
    let outcome = ensure_safe(rejects_with::<Result<String, String>, _>("foo"), None).await;

    match outcome {
        Err(Rescued::Panicked(panic)) => assert_eq!(panic.message(), Some("foo")),
        other => panic!("expected a rescued panic, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ensure_safe_rescues_with_fallback() {
    let outcome = ensure_safe(value_later(None), Some("bar".to_string())).await;

    match outcome {
        Err(Rescued::Failed(error)) => assert_eq!(error, "bar"),
        other => panic!("expected the fallback error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ensure_safe_or_substitutes_fallback() {
    let outcome = ensure_safe_or(value_later(None), "bar".to_string()).await;

    assert_eq!(outcome, Err("bar".to_string()));
}

#[tokio::test]
async fn test_ensure_safe_or_keeps_own_failure() {
    let operation: SafeFuture<'static, i64, String> = Box::pin(async { Err("own".to_string()) });

    let outcome = ensure_safe_or(operation, "bar".to_string()).await;

    assert_eq!(outcome, Err("own".to_string()));
}

#[tokio::test]
async fn test_labelled_guard_behaves_like_free_functions() {
    let guard = Guard::new().with_label("value-later");

    let value = guard.ensure(value_later(Some(1)), None::<String>).await;
    let rescued = guard.ensure_or(value_later(None), "bar".to_string()).await;

    assert_eq!(value.unwrap(), 1);
    assert_eq!(rescued, Err("bar".to_string()));
}

#[tokio::test]
async fn test_runners_can_be_spawned() {
    let handle = tokio::spawn(ensure_safe_or(value_later(None), "bar".to_string()));

    let outcome = handle.await.unwrap();

    assert_eq!(outcome, Err("bar".to_string()));
}

/// Doubles a value produced under `run_safely`, raising a panic with `?`.
async fn doubled_with_anyhow(fail: bool) -> anyhow::Result<u8> {
    let value = run_safely(async move {
        if fail {
            std::panic::panic_any("no value");
        }
        21_u8
    })
    .await?;
    Ok(value * 2)
}

/// Reads a declared-safe value, raising the rescue error with `?`.
async fn value_with_anyhow(value: Option<i64>) -> anyhow::Result<i64> {
    let value = ensure_safe(value_later(value), None).await?;
    Ok(value)
}

#[tokio::test]
async fn test_run_safely_error_converts_into_anyhow() {
    assert_eq!(doubled_with_anyhow(false).await.unwrap(), 42);

    let error = doubled_with_anyhow(true).await.unwrap_err();

    let panic = error.downcast_ref::<Panic>().unwrap();
    assert_eq!(panic.message(), Some("no value"));
    assert_eq!(error.to_string(), "operation panicked: no value");
}

#[tokio::test]
async fn test_ensure_safe_error_converts_into_anyhow() {
    assert_eq!(value_with_anyhow(Some(5)).await.unwrap(), 5);

    let error = value_with_anyhow(None).await.unwrap_err();

    match error.downcast_ref::<Rescued<String>>() {
        Some(Rescued::Panicked(panic)) => {
            assert_eq!(panic.message(), Some("The value is undefined"));
        }
        other => panic!("expected a rescued panic, got {other:?}"),
    }
}

#[test]
fn test_errors_fit_boxed_send_sync_errors() {
    let boxed: Box<dyn std::error::Error + Send + Sync> =
        Box::new(Rescued::<String>::Failed("bar".to_string()));
    assert_eq!(boxed.to_string(), "bar");
}
