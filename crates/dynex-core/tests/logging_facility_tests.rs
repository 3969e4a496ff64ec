#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fields, table, tech_file, tech_text, test_registry};
use dynex_core::compare::compute_diff;
use dynex_core::errors::DynexError;
use dynex_core::logging_facility::test_capture::init_test_capture;
use dynex_core::model::{Kind, Port, State};
use dynex_core::{log_op_end, log_op_error, log_op_start, TechFile};
use dynex_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CHANGE_COUNT, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_IDENTITY_COUNT, FIELD_KIND_COUNT, FIELD_PATH,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DynexError::MissingKind { kind: Kind::Vlan };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_MISSING_KIND"));
}

#[test]
fn test_build_snapshot_owns_single_boundary() {
    let capture = init_test_capture();
    let file = tech_file(&tech_text(&[("show port state", &["1/1 Up"])]));

    let before = capture.count_events(|e| e.op.as_deref() == Some("build_snapshot"));
    TechFile::new(file.path()).build(&test_registry()).unwrap();
    let events: Vec<_> = capture.events_for("build_snapshot");

    assert_eq!(events.len() - before, 2);
    let tail = &events[before..];
    assert_eq!(tail[0].event.as_deref(), Some(EVENT_START));
    assert!(tail[0].field(FIELD_PATH).is_some());
    assert_eq!(tail[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(tail[1].field(FIELD_KIND_COUNT), Some("1"));
    assert_eq!(tail[1].field(FIELD_IDENTITY_COUNT), Some("1"));
}

#[test]
fn test_compute_diff_end_reports_change_count() {
    let capture = init_test_capture();
    let old = table(vec![(
        Port::new("9/9").into(),
        fields(&[("State", State::new("Up").into())]),
    )]);
    let new = table(vec![(
        Port::new("9/9").into(),
        fields(&[("State", State::new("Down").into())]),
    )]);

    compute_diff(&old, &new, None).unwrap();

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_diff")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_CHANGE_COUNT) == Some("1")
    });
    assert!(found >= 1);
}

#[test]
fn test_compute_diff_failure_logs_error_code() {
    let capture = init_test_capture();
    let old = table(vec![(
        Port::new("1/1").into(),
        fields(&[("State", State::new("Up").into())]),
    )]);
    let new = table(vec![]);

    let err = compute_diff(&old, &new, None).unwrap_err();
    assert!(matches!(err, DynexError::MissingKind { .. }));

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_diff")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_MISSING_KIND")
    });
    assert!(found >= 1);
}
