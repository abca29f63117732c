//! Tag helper descriptors and the resolver seam
//!
//! Discovery itself happens outside this crate. The pipeline treats
//! descriptors as opaque values and only preserves their order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::engine::ProjectEngine;
use crate::error::{SnapshotError, SnapshotResult};
use crate::workspace::ProjectModel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagMatchingRule {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundAttribute {
    pub name: String,
    pub type_name: String,
}

/// One discovered tag helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagHelperDescriptor {
    pub kind: String,
    pub name: String,
    pub assembly_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub tag_matching_rules: Vec<TagMatchingRule>,
    #[serde(default)]
    pub bound_attributes: Vec<BoundAttribute>,
    /// Sorted so repeated serialization is byte-identical
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl TagHelperDescriptor {
    pub const DEFAULT_KIND: &'static str = "ITagHelper";

    pub fn new(name: impl Into<String>, assembly_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: Self::DEFAULT_KIND.to_string(),
            display_name: name.clone(),
            name,
            assembly_name: assembly_name.into(),
            tag_matching_rules: Vec::new(),
            bound_attributes: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_matching_rules.push(TagMatchingRule {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
        });
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.bound_attributes.push(BoundAttribute {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }
}

/// Resolves the tag helpers visible to a project.
///
/// `project` is `None` when the workspace has not indexed the project yet;
/// implementations degrade (typically to an empty list) instead of failing.
/// The listener passes a token that is never cancelled.
#[async_trait]
pub trait TagHelperResolver: Send + Sync {
    async fn resolve(
        &self,
        project: Option<Arc<ProjectModel>>,
        engine: &ProjectEngine,
        cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTagHelperResolver;

#[async_trait]
impl TagHelperResolver for EmptyTagHelperResolver {
    async fn resolve(
        &self,
        _project: Option<Arc<ProjectModel>>,
        _engine: &ProjectEngine,
        _cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        Ok(Vec::new())
    }
}

/// Resolver returning a fixed descriptor list, e.g. one captured earlier
#[derive(Debug, Clone, Default)]
pub struct StaticTagHelperResolver {
    descriptors: Vec<TagHelperDescriptor>,
}

impl StaticTagHelperResolver {
    pub fn new(descriptors: Vec<TagHelperDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Load descriptors from a JSON array file
    pub fn from_file(path: &Path) -> SnapshotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::ProjectLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let descriptors =
            serde_json::from_str(&content).map_err(|e| SnapshotError::ProjectLoad {
                path: path.to_path_buf(),
                reason: format!("invalid tag helper list: {e}"),
            })?;
        Ok(Self::new(descriptors))
    }
}

#[async_trait]
impl TagHelperResolver for StaticTagHelperResolver {
    async fn resolve(
        &self,
        _project: Option<Arc<ProjectModel>>,
        _engine: &ProjectEngine,
        cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        if cancel.is_cancelled() {
            return Err(SnapshotError::tag_helper_resolution("resolution cancelled"));
        }
        Ok(self.descriptors.clone())
    }
}
