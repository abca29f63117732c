//! Project engine and file-system collaborators
//!
//! The engine is what the tag helper resolver runs against. It is built
//! fresh per event from the selected configuration and a file system rooted
//! at the project directory.

use std::path::{Path, PathBuf};

use crate::configuration::RazorConfiguration;
use crate::error::SnapshotResult;

/// File-system abstraction rooted at a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFileSystem {
    root: PathBuf,
}

impl ProjectFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[derive(Debug, Clone)]
pub struct ProjectEngine {
    configuration: Option<RazorConfiguration>,
    file_system: ProjectFileSystem,
    features: Vec<String>,
}

impl ProjectEngine {
    pub fn configuration(&self) -> Option<&RazorConfiguration> {
        self.configuration.as_ref()
    }

    pub fn file_system(&self) -> &ProjectFileSystem {
        &self.file_system
    }

    /// Registered feature names, in registration order
    pub fn features(&self) -> &[String] {
        &self.features
    }
}

/// Mutable engine under construction, handed to the customize callback
#[derive(Debug)]
pub struct ProjectEngineBuilder {
    configuration: Option<RazorConfiguration>,
    file_system: ProjectFileSystem,
    features: Vec<String>,
}

impl ProjectEngineBuilder {
    pub fn new(configuration: Option<RazorConfiguration>, file_system: ProjectFileSystem) -> Self {
        Self {
            configuration,
            file_system,
            features: Vec::new(),
        }
    }

    pub fn configuration(&self) -> Option<&RazorConfiguration> {
        self.configuration.as_ref()
    }

    pub fn add_feature(&mut self, feature: impl Into<String>) {
        let feature = feature.into();
        if !self.features.contains(&feature) {
            self.features.push(feature);
        }
    }

    pub fn build(self) -> ProjectEngine {
        ProjectEngine {
            configuration: self.configuration,
            file_system: self.file_system,
            features: self.features,
        }
    }
}

/// Customization hook that leaves the builder untouched
pub fn no_customization(_builder: &mut ProjectEngineBuilder) {}

pub trait ProjectEngineFactory: Send + Sync {
    fn create(
        &self,
        configuration: Option<&RazorConfiguration>,
        file_system: ProjectFileSystem,
        customize: &dyn Fn(&mut ProjectEngineBuilder),
    ) -> SnapshotResult<ProjectEngine>;
}

/// Registers one feature per configuration extension
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProjectEngineFactory;

impl ProjectEngineFactory for DefaultProjectEngineFactory {
    fn create(
        &self,
        configuration: Option<&RazorConfiguration>,
        file_system: ProjectFileSystem,
        customize: &dyn Fn(&mut ProjectEngineBuilder),
    ) -> SnapshotResult<ProjectEngine> {
        let mut builder = ProjectEngineBuilder::new(configuration.cloned(), file_system);

        if let Some(configuration) = configuration {
            for extension in &configuration.extensions {
                builder.add_feature(extension.extension_name.clone());
            }
        }

        customize(&mut builder);
        Ok(builder.build())
    }
}
