//! Snapshot persistence
//!
//! Writes are whole-file replacements through a rename, so readers see
//! either the previous document or the new one. Failures are contained here: the
//! listener keeps running and the project's snapshot is simply stale or
//! absent until the next successful event.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::ProjectConfigurationSnapshot;
use crate::config::OutputConfig;
use crate::error::{SnapshotError, SnapshotResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Already logged; carries the error's status code
    Failed { status_code: String },
}

#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    create_missing_dirs: bool,
}

impl Default for SnapshotWriter {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}

impl SnapshotWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            create_missing_dirs: config.create_missing_dirs,
        }
    }

    /// Indented JSON document for the snapshot
    pub fn serialize(snapshot: &ProjectConfigurationSnapshot) -> SnapshotResult<String> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|source| SnapshotError::Serialize { source })
    }

    /// Serialize and write, never failing; at most one warning is logged
    pub fn write(&self, path: &Path, snapshot: &ProjectConfigurationSnapshot) -> WriteOutcome {
        match self.try_write(path, snapshot) {
            Ok(()) => {
                debug!(path = %path.display(), "Wrote Razor configuration snapshot");
                WriteOutcome::Written
            }
            // TODO: retry transient failures (sharing violations on Windows) once before giving up
            Err(e) => {
                warn!(
                    path = %path.display(),
                    code = %e.status_code(),
                    error = %e,
                    "Failed to persist Razor configuration snapshot"
                );
                WriteOutcome::Failed {
                    status_code: e.status_code(),
                }
            }
        }
    }

    /// Serialize and atomically replace `path`: the document is written to a
    /// sibling temporary file and renamed over the destination
    pub fn try_write(
        &self,
        path: &Path,
        snapshot: &ProjectConfigurationSnapshot,
    ) -> SnapshotResult<()> {
        let content = Self::serialize(snapshot)?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        if self.create_missing_dirs {
            fs::create_dir_all(parent).map_err(|source| SnapshotError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let write_error = |source: std::io::Error| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = NamedTempFile::new_in(parent).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;
        Ok(())
    }

    /// Read a previously written snapshot back
    pub fn load(path: &Path) -> SnapshotResult<ProjectConfigurationSnapshot> {
        let read_error = |reason: String| SnapshotError::Read {
            path: PathBuf::from(path),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| read_error(e.to_string()))
    }
}
