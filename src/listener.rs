//! Build event entry point
//!
//! [`ProjectLoadListener`] is invoked once per project-evaluation event and is
//! the single failure boundary for the pipeline: errors and panics from any
//! collaborator are logged once and swallowed, never handed back to the
//! build. Events are independent; concurrent events for the same project
//! race on the output file and the last write wins.
//!
//! A caught panic still goes through the process panic hook first. With the
//! default hook that prints a second report to stderr, outside `tracing`; the
//! `razorsnap` binary installs a hook that sends it to `tracing` at debug
//! level, leaving the listener's `error!` as the only line at default levels.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::configuration::ConfigurationSelector;
use crate::debug::DebuggerWait;
use crate::engine::ProjectEngineFactory;
use crate::error::{SnapshotError, SnapshotResult};
use crate::path::PathResolver;
use crate::project::ProjectLoadedEvent;
use crate::snapshot::{BuildOutcome, SkipReason, SnapshotBuilder, SnapshotWriter, WriteOutcome};
use crate::tag_helpers::TagHelperResolver;
use crate::workspace::ProjectModelStore;

/// What happened to one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Skipped(SkipReason),
    Written(PathBuf),
    /// The snapshot was built but could not be persisted
    WriteFailed(PathBuf),
    /// An error or panic escaped the pipeline and was logged
    Failed,
}

pub struct ProjectLoadListener {
    builder: SnapshotBuilder,
    writer: SnapshotWriter,
    debugger: DebuggerWait,
}

impl ProjectLoadListener {
    /// Compose the listener from its collaborators, once at startup
    pub fn new(
        settings: &Settings,
        selector: Arc<ConfigurationSelector>,
        engine_factory: Arc<dyn ProjectEngineFactory>,
        resolver: Arc<dyn TagHelperResolver>,
        model_store: Arc<dyn ProjectModelStore>,
    ) -> Self {
        let builder = SnapshotBuilder::new(
            PathResolver::new(settings.output.file_name.clone()),
            selector,
            engine_factory,
            resolver,
            model_store,
        )
        .with_resolve_timeout(settings.listener.resolve_timeout());

        Self {
            builder,
            writer: SnapshotWriter::new(&settings.output),
            debugger: DebuggerWait::from_settings(&settings.listener),
        }
    }

    /// Handle the event on its own task
    pub fn on_project_loaded(
        self: &Arc<Self>,
        event: ProjectLoadedEvent,
    ) -> JoinHandle<EventOutcome> {
        let listener = Arc::clone(self);
        tokio::spawn(async move { listener.process(event).await })
    }

    /// Run the whole pipeline for one event; never fails
    pub async fn process(&self, event: ProjectLoadedEvent) -> EventOutcome {
        let project = event.id.clone();

        let result = std::panic::AssertUnwindSafe(self.run(&event))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(SnapshotError::Panicked {
                    reason: panic_message(panic.as_ref()),
                })
            });

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    project = %project,
                    code = %e.status_code(),
                    error = %e,
                    detail = ?e,
                    "Failed to produce Razor configuration snapshot"
                );
                EventOutcome::Failed
            }
        }
    }

    async fn run(&self, event: &ProjectLoadedEvent) -> SnapshotResult<EventOutcome> {
        self.debugger.maybe_wait(event.instance.as_ref()).await;

        match self.builder.build(event).await? {
            BuildOutcome::Skipped(reason) => {
                debug!(project = %event.id, %reason, "Skipping project");
                Ok(EventOutcome::Skipped(reason))
            }
            BuildOutcome::Built {
                output_path,
                snapshot,
            } => match self.writer.write(&output_path, &snapshot) {
                WriteOutcome::Written => {
                    info!(
                        project = %event.id,
                        path = %output_path.display(),
                        tag_helpers = snapshot.tag_helpers.len(),
                        "Updated Razor configuration snapshot"
                    );
                    Ok(EventOutcome::Written(output_path))
                }
                WriteOutcome::Failed { .. } => Ok(EventOutcome::WriteFailed(output_path)),
            },
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
