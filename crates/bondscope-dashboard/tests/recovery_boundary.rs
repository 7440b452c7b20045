//! Recovery boundary behavior under paused tokio time.

use std::cell::Cell;
use std::time::Duration;

use bondscope_dashboard::{RecoveryBoundary, RecoveryError, RecoveryState, RetryPolicy};
use tokio::time::Instant;

fn always_fails(calls: &Cell<u32>) -> impl FnMut() -> Result<(), String> + '_ {
    move || {
        calls.set(calls.get() + 1);
        Err("chart data missing".to_string())
    }
}

#[tokio::test(start_paused = true)]
async fn test_success_stays_ok() {
    let mut boundary = RecoveryBoundary::default();
    let value = boundary.render(|| Ok::<_, String>(42)).await.unwrap();
    assert_eq!(value, 42);
    assert_eq!(boundary.state(), &RecoveryState::Ok);
    assert!(boundary.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_exhausts_after_three_retries() {
    let mut boundary = RecoveryBoundary::default();
    let calls = Cell::new(0);
    let started = Instant::now();

    let result = boundary.render(always_fails(&calls)).await;

    // one initial attempt plus three retries, waiting 1s + 2s + 4s
    assert_eq!(calls.get(), 4);
    assert_eq!(started.elapsed(), Duration::from_secs(7));
    assert_eq!(
        result,
        Err(RecoveryError::Exhausted {
            attempts: 4,
            last_error: "chart data missing".into(),
        })
    );
    assert_eq!(boundary.state().name(), "exhausted");

    let delays: Vec<u64> = boundary
        .history()
        .iter()
        .filter_map(|s| match s {
            RecoveryState::Retrying { delay_ms, .. } => Some(*delay_ms),
            _ => None,
        })
        .collect();
    assert_eq!(delays, vec![1000, 2000, 4000]);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_fails_fast_until_reset() {
    let mut boundary = RecoveryBoundary::default();
    let calls = Cell::new(0);
    let _ = boundary.render(always_fails(&calls)).await;
    assert_eq!(calls.get(), 4);

    let started = Instant::now();
    let again = boundary.render(always_fails(&calls)).await;
    assert!(again.is_err());
    assert_eq!(calls.get(), 4, "exhausted boundary must not render");
    assert_eq!(started.elapsed(), Duration::ZERO);

    boundary.reset();
    assert_eq!(boundary.state(), &RecoveryState::Ok);
    assert_eq!(boundary.retries_used(), 0);
    let value = boundary.render(|| Ok::<_, String>("ok")).await.unwrap();
    assert_eq!(value, "ok");
}

#[tokio::test(start_paused = true)]
async fn test_recovers_on_retry() {
    let mut boundary = RecoveryBoundary::default();
    let calls = Cell::new(0);

    let value = boundary
        .render(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err("transient")
            } else {
                Ok(calls.get())
            }
        })
        .await
        .unwrap();

    assert_eq!(value, 3);
    assert_eq!(boundary.state(), &RecoveryState::Ok);
    assert_eq!(boundary.retries_used(), 0);
    let names: Vec<&str> = boundary.history().iter().map(RecoveryState::name).collect();
    assert_eq!(names, vec!["error", "retrying", "error", "retrying", "ok"]);
}

#[tokio::test(start_paused = true)]
async fn test_zero_retry_policy() {
    let mut boundary = RecoveryBoundary::new(RetryPolicy {
        max_retries: 0,
        ..RetryPolicy::default()
    });
    let calls = Cell::new(0);
    let result = boundary.render(always_fails(&calls)).await;
    assert_eq!(calls.get(), 1);
    assert!(matches!(result, Err(RecoveryError::Exhausted { attempts: 1, .. })));
    assert!(boundary.fallback_message().is_some());
}
