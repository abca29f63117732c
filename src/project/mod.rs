//! Evaluated project data delivered with each build event
//!
//! The build engine is an external collaborator; this module only models the
//! read-only view the pipeline queries: properties by name, items by type.
//! Absent properties read as the empty string.

pub mod properties;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{SnapshotError, SnapshotResult};

/// Read-only view over a project's evaluated properties and items
pub trait ProjectPropertyView: Send + Sync {
    /// Value of the property, or `""` when absent
    fn property(&self, name: &str) -> &str;

    /// Items of the given type, in evaluation order
    fn items(&self, item_type: &str) -> &[ProjectItem];

    /// Declared project capabilities (`ProjectCapability` item includes)
    fn capabilities(&self) -> BTreeSet<String> {
        self.items(properties::items::PROJECT_CAPABILITY)
            .iter()
            .map(|item| item.include.trim().to_string())
            .filter(|capability| !capability.is_empty())
            .collect()
    }
}

/// A single evaluated item with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectItem {
    pub include: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ProjectItem {
    pub fn new(include: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// Metadata value, or `""` when absent
    pub fn metadata(&self, name: &str) -> &str {
        self.metadata.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Snapshot of one project evaluation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInstance {
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub items: HashMap<String, Vec<ProjectItem>>,
}

impl ProjectInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_item(mut self, item_type: impl Into<String>, item: ProjectItem) -> Self {
        self.items.entry(item_type.into()).or_default().push(item);
        self
    }

    pub fn with_capability(self, capability: impl Into<String>) -> Self {
        self.with_item(
            properties::items::PROJECT_CAPABILITY,
            ProjectItem::new(capability),
        )
    }

    /// Load a JSON project description (`{"properties": {..}, "items": {..}}`)
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::ProjectLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| SnapshotError::ProjectLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ProjectPropertyView for ProjectInstance {
    fn property(&self, name: &str) -> &str {
        self.properties.get(name).map(String::as_str).unwrap_or("")
    }

    fn items(&self, item_type: &str) -> &[ProjectItem] {
        self.items
            .get(item_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Opaque identity used to look up the workspace's project model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fired by the build tool after a project has been evaluated
#[derive(Debug, Clone)]
pub struct ProjectLoadedEvent {
    pub id: ProjectId,
    pub instance: Arc<ProjectInstance>,
}

impl ProjectLoadedEvent {
    pub fn new(id: ProjectId, instance: ProjectInstance) -> Self {
        Self {
            id,
            instance: Arc::new(instance),
        }
    }
}
