//! Razor project configuration snapshots for language servers
//!
//! Reacts to build-tool project evaluation events and persists each
//! project's Razor configuration, target framework and tag helpers to
//! `project.razor.json`, so a language server can load them without
//! re-running the build.

pub mod config;
pub mod configuration;
pub mod debug;
pub mod engine;
pub mod error;
pub mod listener;
pub mod path;
pub mod project;
pub mod snapshot;
pub mod tag_helpers;
pub mod workspace;

// Explicit exports for better API clarity
pub use config::Settings;
pub use configuration::{
    ConfigurationProvider, ConfigurationProviderContext, ConfigurationSelector, ProviderRegistry,
    RazorConfiguration, RazorExtension, RazorLanguageVersion,
};
pub use error::{SnapshotError, SnapshotResult};
pub use listener::{EventOutcome, ProjectLoadListener};
pub use path::{CONFIGURATION_FILE_NAME, PathResolver};
pub use project::{ProjectId, ProjectInstance, ProjectItem, ProjectLoadedEvent, ProjectPropertyView};
pub use snapshot::{ProjectConfigurationSnapshot, SkipReason, SnapshotWriter};
pub use tag_helpers::{TagHelperDescriptor, TagHelperResolver};
