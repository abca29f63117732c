//! Project configuration snapshots
//!
//! A snapshot is assembled once per build event, written as a whole-file
//! replacement and then dropped. Nothing is carried between events.

pub mod builder;
pub mod writer;

pub use builder::{BuildOutcome, SkipReason, SnapshotBuilder};
pub use writer::{SnapshotWriter, WriteOutcome};

use serde::{Deserialize, Serialize};

use crate::configuration::RazorConfiguration;
use crate::tag_helpers::TagHelperDescriptor;

/// The document persisted at `<intermediate output>/project.razor.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectConfigurationSnapshot {
    pub project_file_path: String,
    /// `null` when no provider recognized the project
    pub configuration: Option<RazorConfiguration>,
    pub target_framework: String,
    pub tag_helpers: Vec<TagHelperDescriptor>,
}
