#![allow(clippy::unwrap_used, clippy::expect_used)]

use gqlx_core::errors::{ExError, ExErrorKind};
use gqlx_core::logging_facility::test_capture::init_test_capture;
use gqlx_core::logging_facility::SpanTimer;
use gqlx_core::{log_op_end, log_op_error, log_op_start};
use gqlx_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, request_id = "req-start-1");

    let events = capture.events_with("request_id", "req-start-1");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].op.as_deref(), Some(op_name));
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::TxnConflict).with_message("conflict");
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    let fields = &error_events[0].fields;
    assert_eq!(fields.get("err_code"), Some(&"ERR_TXN_CONFLICT".to_string()));
    assert_eq!(fields.get("err_kind"), Some(&"TxnConflict".to_string()));
    assert_eq!(error_events[0].level, tracing::Level::WARN);
}

#[test]
fn test_span_timer_records_duration_on_close() {
    let capture = init_test_capture();

    {
        let span = tracing::info_span!(
            "timer_test_span",
            marker = "timer-1",
            duration_ms = tracing::field::Empty
        );
        let _timer = SpanTimer::start(&span);
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let closed = capture.closed_spans_with("timer_test_span", "marker", "timer-1");
    assert_eq!(closed.len(), 1);
    let duration: u64 = closed[0].fields["duration_ms"].parse().unwrap();
    assert!(duration >= 5);
}

#[test]
fn test_span_timer_records_duration_on_panic() {
    let capture = init_test_capture();

    let result = std::panic::catch_unwind(|| {
        let span = tracing::info_span!(
            "timer_test_span",
            marker = "timer-panic",
            duration_ms = tracing::field::Empty
        );
        let _timer = SpanTimer::start(&span);
        panic!("engine blew up");
    });

    assert!(result.is_err());
    let closed = capture.closed_spans_with("timer_test_span", "marker", "timer-panic");
    assert_eq!(closed.len(), 1);
    assert!(closed[0].fields.contains_key("duration_ms"));
}

#[test]
fn test_events_record_enclosing_span() {
    let capture = init_test_capture();

    let span = tracing::info_span!("enclosing_span");
    span.in_scope(|| {
        log_op_start!("in_span_op", request_id = "req-in-span");
    });

    let events = capture.events_with("request_id", "req-in-span");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].span.as_deref(), Some("enclosing_span"));
}
