//! Snapshot assembly for a single build event
//!
//! Each missing input short-circuits to [`BuildOutcome::Skipped`]; those are
//! expected for projects we do not track and are never errors. The only
//! suspension point is the tag helper resolver call.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ProjectConfigurationSnapshot;
use crate::configuration::ConfigurationSelector;
use crate::engine::{ProjectEngineFactory, ProjectFileSystem, no_customization};
use crate::error::{SnapshotError, SnapshotResult};
use crate::path::PathResolver;
use crate::project::{ProjectLoadedEvent, ProjectPropertyView, properties};
use crate::tag_helpers::TagHelperResolver;
use crate::workspace::ProjectModelStore;

/// Why an event produced no snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoOutputPath,
    NoProjectFilePath,
    NoTargetFramework,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoOutputPath => "no intermediate output path",
            Self::NoProjectFilePath => "no project file path",
            Self::NoTargetFramework => "no target framework",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Skipped(SkipReason),
    Built {
        output_path: PathBuf,
        snapshot: ProjectConfigurationSnapshot,
    },
}

/// `TargetFramework`, or the legacy `TargetFrameworkVersion` only when the former is empty
pub fn select_target_framework<P>(project: &P) -> Option<&str>
where
    P: ProjectPropertyView + ?Sized,
{
    [properties::TARGET_FRAMEWORK, properties::TARGET_FRAMEWORK_VERSION]
        .into_iter()
        .map(|name| project.property(name))
        .find(|value| !value.is_empty())
}

/// Orchestrates one event's pipeline up to, not including, the write
pub struct SnapshotBuilder {
    path_resolver: PathResolver,
    selector: Arc<ConfigurationSelector>,
    engine_factory: Arc<dyn ProjectEngineFactory>,
    resolver: Arc<dyn TagHelperResolver>,
    model_store: Arc<dyn ProjectModelStore>,
    resolve_timeout: Option<Duration>,
}

impl SnapshotBuilder {
    pub fn new(
        path_resolver: PathResolver,
        selector: Arc<ConfigurationSelector>,
        engine_factory: Arc<dyn ProjectEngineFactory>,
        resolver: Arc<dyn TagHelperResolver>,
        model_store: Arc<dyn ProjectModelStore>,
    ) -> Self {
        Self {
            path_resolver,
            selector,
            engine_factory,
            resolver,
            model_store,
            resolve_timeout: None,
        }
    }

    /// Bound the tag helper resolution; `None` waits indefinitely
    pub fn with_resolve_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub async fn build(&self, event: &ProjectLoadedEvent) -> SnapshotResult<BuildOutcome> {
        let project = event.instance.as_ref();

        let Some(output_path) = self.path_resolver.try_resolve_output_path(project) else {
            return Ok(BuildOutcome::Skipped(SkipReason::NoOutputPath));
        };

        let project_file_path = project.property(properties::PROJECT_FULL_PATH);
        if project_file_path.is_empty() {
            return Ok(BuildOutcome::Skipped(SkipReason::NoProjectFilePath));
        }

        let Some(target_framework) = select_target_framework(project) else {
            return Ok(BuildOutcome::Skipped(SkipReason::NoTargetFramework));
        };

        let configuration = self.selector.resolve(&project.capabilities(), project);

        let file_system = ProjectFileSystem::new(project.property(properties::PROJECT_DIRECTORY));
        let engine = self
            .engine_factory
            .create(configuration.as_ref(), file_system, &no_customization)?;

        let model = self.model_store.get(&event.id);
        if model.is_none() {
            debug!(project = %event.id, "Project model not indexed yet, resolving without it");
        }

        let resolution = self
            .resolver
            .resolve(model, &engine, CancellationToken::new());
        let tag_helpers = match self.resolve_timeout {
            Some(timeout) => tokio::time::timeout(timeout, resolution)
                .await
                .map_err(|_| SnapshotError::ResolutionTimeout { timeout })??,
            None => resolution.await?,
        };

        Ok(BuildOutcome::Built {
            output_path,
            snapshot: ProjectConfigurationSnapshot {
                project_file_path: project_file_path.to_string(),
                configuration,
                target_framework: target_framework.to_string(),
                tag_helpers,
            },
        })
    }
}
