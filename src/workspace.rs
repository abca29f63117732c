//! Workspace project models
//!
//! The workspace indexes projects independently of build events, so a model
//! may not exist yet when an event arrives. Absence is expected.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::project::ProjectId;

/// Compilation metadata the tag helper resolver works from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModel {
    pub id: ProjectId,
    pub assembly_name: String,
    pub metadata_references: Vec<PathBuf>,
}

impl ProjectModel {
    pub fn new(id: ProjectId, assembly_name: impl Into<String>) -> Self {
        Self {
            id,
            assembly_name: assembly_name.into(),
            metadata_references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<PathBuf>) -> Self {
        self.metadata_references.push(reference.into());
        self
    }
}

pub trait ProjectModelStore: Send + Sync {
    fn get(&self, id: &ProjectId) -> Option<Arc<ProjectModel>>;
}

/// Thread-safe in-memory store keyed by project identity
#[derive(Default)]
pub struct InMemoryProjectModelStore {
    inner: RwLock<HashMap<ProjectId, Arc<ProjectModel>>>,
}

impl InMemoryProjectModelStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, model: ProjectModel) {
        let mut map = self.inner.write();
        map.insert(model.id.clone(), Arc::new(model));
    }

    pub fn remove(&self, id: &ProjectId) -> Option<Arc<ProjectModel>> {
        let mut map = self.inner.write();
        map.remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl ProjectModelStore for InMemoryProjectModelStore {
    fn get(&self, id: &ProjectId) -> Option<Arc<ProjectModel>> {
        let map = self.inner.read();
        map.get(id).cloned()
    }
}
