//! Failures are logged once and never escape the listener

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tracing::instrument::WithSubscriber;

use crate::common::{
    CapturedLogs, FailingResolver, PanickingResolver, RecordingResolver, SlowResolver, listener,
    listener_with_settings, razor_project, sample_tag_helpers, selector_with,
};
use razorsnap::project::properties;
use razorsnap::workspace::InMemoryProjectModelStore;
use razorsnap::{EventOutcome, ProjectId, ProjectLoadedEvent, Settings};

#[tokio::test]
async fn unwritable_destination_is_logged_once_and_later_events_succeed() {
    let temp_dir = TempDir::new().unwrap();
    let listener = listener(
        selector_with(Vec::new()),
        RecordingResolver::new(sample_tag_helpers()),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    // A regular file where the output directory should be
    let blocked_dir = temp_dir.path().join("blocked");
    std::fs::write(&blocked_dir, "not a directory").unwrap();
    let blocked = razor_project(temp_dir.path())
        .with_property(
            properties::PROJECT_DIRECTORY,
            blocked_dir.display().to_string(),
        )
        .with_property(properties::INTERMEDIATE_OUTPUT_PATH, "obj");

    let logs = CapturedLogs::default();
    let outcome = listener
        .process(ProjectLoadedEvent::new(ProjectId::new("blocked"), blocked))
        .with_subscriber(logs.subscriber())
        .await;

    assert_eq!(
        outcome,
        EventOutcome::WriteFailed(blocked_dir.join("obj").join("project.razor.json"))
    );
    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "expected one log line, got {lines:?}");
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("Failed to persist Razor configuration snapshot"));

    let outcome = listener
        .process(ProjectLoadedEvent::new(
            ProjectId::new("healthy"),
            razor_project(temp_dir.path()),
        ))
        .await;
    assert!(matches!(outcome, EventOutcome::Written(_)));
}

#[tokio::test]
async fn resolver_error_is_logged_once() {
    let temp_dir = TempDir::new().unwrap();
    let listener = listener(
        selector_with(Vec::new()),
        Arc::new(FailingResolver),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    let logs = CapturedLogs::default();
    let outcome = listener
        .process(ProjectLoadedEvent::new(
            ProjectId::new("proj"),
            razor_project(temp_dir.path()),
        ))
        .with_subscriber(logs.subscriber())
        .await;

    assert_eq!(outcome, EventOutcome::Failed);
    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "expected one log line, got {lines:?}");
    assert!(lines[0].contains("ERROR"));
    assert!(lines[0].contains("TAG_HELPER_RESOLUTION_ERROR"));
    assert!(lines[0].contains("compilation has errors"));

    // Nothing partial is left behind
    let output_dir = temp_dir.path().join("repo").join("proj").join("obj");
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn resolver_panic_is_contained() {
    let temp_dir = TempDir::new().unwrap();
    let listener = listener(
        selector_with(Vec::new()),
        Arc::new(PanickingResolver),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    let logs = CapturedLogs::default();
    let outcome = listener
        .process(ProjectLoadedEvent::new(
            ProjectId::new("proj"),
            razor_project(temp_dir.path()),
        ))
        .with_subscriber(logs.subscriber())
        .await;

    assert_eq!(outcome, EventOutcome::Failed);
    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "expected one log line, got {lines:?}");
    assert!(lines[0].contains("EVENT_PANICKED"));
    assert!(lines[0].contains("resolver blew up"));
}

#[tokio::test]
async fn spawned_event_failure_does_not_fail_the_task() {
    let temp_dir = TempDir::new().unwrap();
    let listener = listener(
        selector_with(Vec::new()),
        Arc::new(PanickingResolver),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    let handle = listener.on_project_loaded(ProjectLoadedEvent::new(
        ProjectId::new("proj"),
        razor_project(temp_dir.path()),
    ));
    assert_eq!(handle.await.unwrap(), EventOutcome::Failed);
}

#[tokio::test]
async fn resolution_deadline_is_enforced_when_configured() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.listener.resolve_timeout_ms = Some(20);

    let listener = listener_with_settings(
        &settings,
        selector_with(Vec::new()),
        Arc::new(SlowResolver(Duration::from_secs(30))),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    let logs = CapturedLogs::default();
    let outcome = listener
        .process(ProjectLoadedEvent::new(
            ProjectId::new("proj"),
            razor_project(temp_dir.path()),
        ))
        .with_subscriber(logs.subscriber())
        .await;

    assert_eq!(outcome, EventOutcome::Failed);
    assert!(logs.lines()[0].contains("TAG_HELPER_RESOLUTION_TIMEOUT"));
}

#[tokio::test]
async fn fast_resolution_is_unaffected_by_deadline() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.listener.resolve_timeout_ms = Some(10_000);

    let listener = listener_with_settings(
        &settings,
        selector_with(Vec::new()),
        RecordingResolver::new(sample_tag_helpers()),
        Arc::new(InMemoryProjectModelStore::new()),
    );

    let outcome = listener
        .process(ProjectLoadedEvent::new(
            ProjectId::new("proj"),
            razor_project(temp_dir.path()),
        ))
        .await;
    assert!(matches!(outcome, EventOutcome::Written(_)));
}
