use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::{Duration, Instant};

use super::{DEBOUNCE_MS, InputController};
use crate::convert::ConvertError;

/// Backdate the armed deadline so the quiet period has already elapsed.
fn settle(controller: &mut InputController) {
    assert!(controller.last_input.is_some(), "no deadline armed");
    controller.last_input = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 10));
}

fn counting_listener(controller: &mut InputController) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    controller.subscribe(Box::new(move |_| {
        inner.fetch_add(1, Ordering::SeqCst);
    }));
    count
}

#[test]
fn test_idle_not_ready() {
    let controller = InputController::new();
    assert!(!controller.is_ready());
    assert!(controller.result().is_none());
    assert_eq!(controller.sleep_duration(), Duration::from_secs(86400));
}

#[test]
fn test_pending_before_quiet_period() {
    let mut controller = InputController::new();
    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");

    // Deadline armed but quiet period not elapsed: nothing fires.
    assert!(!controller.is_ready());
    assert!(controller.take_if_ready().is_none());
    assert!(controller.result().is_none());
    assert!(controller.sleep_duration() <= Duration::from_millis(DEBOUNCE_MS));
}

#[test]
fn test_settle_publishes_success() {
    let mut controller = InputController::new();
    let count = counting_listener(&mut controller);

    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    settle(&mut controller);

    let result = controller.take_if_ready().expect("ready");
    assert_eq!(result.as_ref().unwrap().as_str(), "<svg/>");
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Settled: deadline consumed, result stays live.
    assert!(!controller.is_ready());
    assert!(controller.result().is_some());
}

#[test]
fn test_settle_publishes_failure() {
    let mut controller = InputController::new();
    controller.on_input("not-a-data-url");
    settle(&mut controller);

    let result = controller.take_if_ready().expect("ready");
    assert_eq!(result.as_ref().unwrap_err(), &ConvertError::Format);

    // A failure is terminal for the cycle, not for the controller.
    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    settle(&mut controller);
    assert!(controller.take_if_ready().unwrap().is_ok());
}

#[test]
fn test_rapid_input_fires_once_with_last_value() {
    let mut controller = InputController::new();
    let count = counting_listener(&mut controller);

    // Two inputs inside one quiet period: the second replaces the first's
    // deadline, so exactly one conversion runs and it sees the second value.
    controller.on_input("data:image/svg+xml,%3Cfirst%2F%3E");
    controller.on_input("data:image/svg+xml,%3Csecond%2F%3E");
    settle(&mut controller);

    let result = controller.take_if_ready().expect("ready");
    assert_eq!(result.as_ref().unwrap().as_str(), "<second/>");
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Nothing left pending from the superseded input.
    assert!(controller.take_if_ready().is_none());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_new_input_rearms_from_settled() {
    let mut controller = InputController::new();
    let count = counting_listener(&mut controller);

    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    settle(&mut controller);
    controller.take_if_ready().unwrap();

    controller.on_input("data:image/svg+xml,%3Cg%2F%3E");
    settle(&mut controller);
    let result = controller.take_if_ready().expect("ready");
    assert_eq!(result.as_ref().unwrap().as_str(), "<g/>");
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_dispose_cancels_pending() {
    let mut controller = InputController::new();
    let count = counting_listener(&mut controller);

    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    settle(&mut controller);
    controller.dispose();

    assert!(!controller.is_ready());
    assert!(controller.take_if_ready().is_none());
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(controller.sleep_duration(), Duration::from_secs(86400));
}

#[test]
fn test_copied_flag_lifecycle() {
    let mut controller = InputController::new();

    // No settled success yet: acknowledgment is a no-op.
    controller.mark_copied();
    assert!(!controller.copied());

    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    settle(&mut controller);
    controller.take_if_ready().unwrap();
    controller.mark_copied();
    assert!(controller.copied());

    // New input clears the acknowledgment.
    controller.on_input("data:image/svg+xml,%3Cg%2F%3E");
    assert!(!controller.copied());
}

#[test]
fn test_copied_not_set_on_failure() {
    let mut controller = InputController::new();
    controller.on_input("bogus");
    settle(&mut controller);
    controller.take_if_ready().unwrap();

    controller.mark_copied();
    assert!(!controller.copied());
}

#[test]
fn test_custom_debounce_window() {
    let mut controller = InputController::with_debounce(Duration::from_millis(5));
    controller.on_input("data:image/svg+xml,%3Csvg%2F%3E");
    std::thread::sleep(Duration::from_millis(10));

    assert!(controller.is_ready());
    assert!(controller.take_if_ready().unwrap().is_ok());
}
