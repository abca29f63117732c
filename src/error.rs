//! Error types for the snapshot pipeline
//!
//! Expected absences (missing properties, no matching provider, no project
//! model) are not errors and never reach this module. Everything here is an
//! unexpected failure that is either contained at the writer or caught once
//! by the listener's failure boundary.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for snapshot assembly and persistence
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// JSON encoding of the snapshot document failed
    #[error("Failed to serialize configuration snapshot: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write configuration snapshot '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration snapshot '{path}': {reason}")]
    Read { path: PathBuf, reason: String },

    /// The external tag-helper resolver reported a failure
    #[error("Tag helper resolution failed: {reason}")]
    TagHelperResolution { reason: String },

    #[error("Tag helper resolution did not finish within {timeout:?}")]
    ResolutionTimeout { timeout: Duration },

    #[error("Failed to load project description '{path}': {reason}")]
    ProjectLoad { path: PathBuf, reason: String },

    /// A collaborator panicked while the event was being processed
    #[error("Event processing panicked: {reason}")]
    Panicked { reason: String },
}

impl SnapshotError {
    pub fn tag_helper_resolution(reason: impl Into<String>) -> Self {
        Self::TagHelperResolution {
            reason: reason.into(),
        }
    }

    /// Get a stable status code for this error type.
    ///
    /// Used in log fields and CLI output for programmatic handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::Serialize { .. } => "SNAPSHOT_SERIALIZE_ERROR",
            Self::Write { .. } => "SNAPSHOT_WRITE_ERROR",
            Self::CreateDir { .. } => "SNAPSHOT_CREATE_DIR_ERROR",
            Self::Read { .. } => "SNAPSHOT_READ_ERROR",
            Self::TagHelperResolution { .. } => "TAG_HELPER_RESOLUTION_ERROR",
            Self::ResolutionTimeout { .. } => "TAG_HELPER_RESOLUTION_TIMEOUT",
            Self::ProjectLoad { .. } => "PROJECT_LOAD_ERROR",
            Self::Panicked { .. } => "EVENT_PANICKED",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::Write { .. } | Self::CreateDir { .. } => vec![
                "Check that the intermediate output directory is writable",
                "Rebuild the project to regenerate the snapshot",
            ],
            Self::Read { .. } => vec![
                "Treat the project as having no known configuration yet",
                "Rebuild the project to regenerate the snapshot",
            ],
            Self::ResolutionTimeout { .. } => vec![
                "Increase listener.resolve_timeout_ms or remove it to wait indefinitely",
            ],
            Self::ProjectLoad { .. } => vec![
                "Check that the file exists and contains a JSON project description",
            ],
            _ => vec![],
        }
    }
}

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
