use crate::display_state::{
    DisplayModel, PLACEHOLDER_TEXT, RECOGNITION_FAILED_TEXT, SurfaceStatus,
};

use uuid::Uuid;

/// WHAT: The surface starts idle with the placeholder text
/// WHY: Before any cycle completes there is nothing to show
#[test]
fn given_fresh_display_when_inspecting_then_idle_with_placeholder() {
    // Given/When: A fresh display model
    let (model, _rx) = DisplayModel::new();
    let snapshot = model.snapshot();

    // Then: Idle, placeholder text, no error
    assert_eq!(snapshot.status, SurfaceStatus::Idle);
    assert_eq!(snapshot.transcript, PLACEHOLDER_TEXT);
    assert!(snapshot.last_error.is_none());
}

/// WHAT: A matching transcript updates the display
/// WHY: The result of the most recent cycle must be rendered
#[test]
fn given_expected_session_when_transcript_applied_then_displayed() {
    // Given: A display waiting on a session's transcript
    let (mut model, mut rx) = DisplayModel::new();
    let session_id = Uuid::new_v4();
    model.begin_recording();
    model.expect_transcript(session_id);

    // When: The matching transcript arrives
    let applied = model.apply_transcript(session_id, Some("hello there".to_string()));

    // Then: It is displayed, the surface is idle again, observers notified
    assert!(applied);
    let snapshot = model.snapshot();
    assert_eq!(snapshot.status, SurfaceStatus::Idle);
    assert_eq!(snapshot.transcript, "hello there");
    assert!(rx.has_changed().unwrap());
}

/// WHAT: A failed recognition renders the fixed failure text
/// WHY: The user sees "Recognition failed" instead of stale content
#[test]
fn given_expected_session_when_recognition_fails_then_failure_text_displayed() {
    // Given: A display waiting on a session's transcript
    let (mut model, _rx) = DisplayModel::new();
    let session_id = Uuid::new_v4();
    model.expect_transcript(session_id);

    // When: The outcome carries no text
    let applied = model.apply_transcript(session_id, None);

    // Then: The failure placeholder is shown
    assert!(applied);
    assert_eq!(model.snapshot().transcript, RECOGNITION_FAILED_TEXT);
    assert_eq!(model.snapshot().status, SurfaceStatus::Idle);
}

/// WHAT: A transcript from a superseded session is discarded
/// WHY: Only the transcription matching the most recent completed
/// recording may update the display
#[test]
fn given_newer_cycle_when_stale_transcript_arrives_then_discarded() {
    // Given: A display that moved on to a newer session
    let (mut model, _rx) = DisplayModel::new();
    let old_session = Uuid::new_v4();
    let new_session = Uuid::new_v4();
    model.expect_transcript(old_session);
    model.expect_transcript(new_session);

    // When: The old session's transcript finally arrives
    let applied = model.apply_transcript(old_session, Some("late result".to_string()));

    // Then: It is discarded and the display untouched
    assert!(!applied);
    assert_eq!(model.snapshot().transcript, PLACEHOLDER_TEXT);

    // And the new session's transcript still lands
    assert!(model.apply_transcript(new_session, Some("fresh result".to_string())));
    assert_eq!(model.snapshot().transcript, "fresh result");
}

/// WHAT: A second outcome for the same session is ignored
/// WHY: The callback contract is exactly once per stop-event
#[test]
fn given_applied_transcript_when_applied_again_then_discarded() {
    // Given: A display that already consumed a session's transcript
    let (mut model, _rx) = DisplayModel::new();
    let session_id = Uuid::new_v4();
    model.expect_transcript(session_id);
    assert!(model.apply_transcript(session_id, Some("first".to_string())));

    // When: A duplicate outcome shows up
    let applied = model.apply_transcript(session_id, Some("second".to_string()));

    // Then: The duplicate is discarded
    assert!(!applied);
    assert_eq!(model.snapshot().transcript, "first");
}

/// WHAT: Capture/playback failures surface as a visible error state
/// WHY: Silent absorption would make failures untestable and invisible
#[test]
fn given_reported_error_when_inspecting_then_error_state_visible() {
    // Given: A display model
    let (mut model, _rx) = DisplayModel::new();

    // When: A playback failure is reported
    model.report_error("Playback failed");

    // Then: The error state and message are visible
    let snapshot = model.snapshot();
    assert_eq!(snapshot.status, SurfaceStatus::Error);
    assert_eq!(snapshot.last_error.as_deref(), Some("Playback failed"));
}

/// WHAT: A new recording clears the previous error
/// WHY: The next user action is the recovery path
#[test]
fn given_error_state_when_recording_begins_then_error_cleared() {
    // Given: A display in the error state
    let (mut model, _rx) = DisplayModel::new();
    model.report_error("Recording failed");

    // When: A new recording starts
    model.begin_recording();

    // Then: The surface shows recording with the error gone
    let snapshot = model.snapshot();
    assert_eq!(snapshot.status, SurfaceStatus::Recording);
    assert!(snapshot.last_error.is_none());
}
