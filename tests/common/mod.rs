//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use razorsnap::configuration::providers::FallbackConfigurationProvider;
use razorsnap::engine::{DefaultProjectEngineFactory, ProjectEngine};
use razorsnap::project::properties;
use razorsnap::workspace::{InMemoryProjectModelStore, ProjectModel};
use razorsnap::{
    ConfigurationProvider, ConfigurationProviderContext, ConfigurationSelector, ProjectInstance,
    ProjectLoadListener, ProviderRegistry, RazorConfiguration, RazorExtension,
    RazorLanguageVersion, Settings, SnapshotError, SnapshotResult, TagHelperDescriptor,
    TagHelperResolver,
};

// ============================================================================
// Log capture
// ============================================================================

/// In-memory sink for a fmt subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Subscriber recording WARN and above into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish()
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub struct CapturedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

// ============================================================================
// Mock providers
// ============================================================================

/// Matches when the project declares `capability`
pub struct CapabilityProvider {
    pub capability: &'static str,
    pub configuration: RazorConfiguration,
}

impl CapabilityProvider {
    pub fn new(capability: &'static str, configuration_name: &str) -> Arc<Self> {
        Arc::new(Self {
            capability,
            configuration: RazorConfiguration::new(
                configuration_name,
                RazorLanguageVersion::LATEST,
                vec![RazorExtension::new(configuration_name)],
            ),
        })
    }
}

impl ConfigurationProvider for CapabilityProvider {
    fn name(&self) -> &'static str {
        self.capability
    }

    fn try_resolve(
        &self,
        context: &ConfigurationProviderContext<'_>,
    ) -> Option<RazorConfiguration> {
        context
            .has_capability(self.capability)
            .then(|| self.configuration.clone())
    }
}

/// Never matches
pub struct DecliningProvider;

impl ConfigurationProvider for DecliningProvider {
    fn name(&self) -> &'static str {
        "declining"
    }

    fn try_resolve(
        &self,
        _context: &ConfigurationProviderContext<'_>,
    ) -> Option<RazorConfiguration> {
        None
    }
}

pub fn selector_with(providers: Vec<Arc<dyn ConfigurationProvider>>) -> Arc<ConfigurationSelector> {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry.add(provider);
    }
    Arc::new(ConfigurationSelector::new(
        registry,
        Arc::new(FallbackConfigurationProvider),
    ))
}

// ============================================================================
// Mock tag helper resolvers
// ============================================================================

/// Returns fixed descriptors and records what it was called with
#[derive(Default)]
pub struct RecordingResolver {
    pub descriptors: Vec<TagHelperDescriptor>,
    pub calls: AtomicUsize,
    pub calls_with_model: AtomicUsize,
    pub seen_features: Mutex<Vec<String>>,
}

impl RecordingResolver {
    pub fn new(descriptors: Vec<TagHelperDescriptor>) -> Arc<Self> {
        Arc::new(Self {
            descriptors,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagHelperResolver for RecordingResolver {
    async fn resolve(
        &self,
        project: Option<Arc<ProjectModel>>,
        engine: &ProjectEngine,
        cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        assert!(!cancel.is_cancelled());
        self.calls.fetch_add(1, Ordering::SeqCst);
        if project.is_some() {
            self.calls_with_model.fetch_add(1, Ordering::SeqCst);
        }
        *self.seen_features.lock() = engine.features().to_vec();
        // Suspend once so concurrent events genuinely interleave
        tokio::task::yield_now().await;
        Ok(self.descriptors.clone())
    }
}

pub struct FailingResolver;

#[async_trait]
impl TagHelperResolver for FailingResolver {
    async fn resolve(
        &self,
        _project: Option<Arc<ProjectModel>>,
        _engine: &ProjectEngine,
        _cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        Err(SnapshotError::tag_helper_resolution("compilation has errors"))
    }
}

pub struct PanickingResolver;

#[async_trait]
impl TagHelperResolver for PanickingResolver {
    async fn resolve(
        &self,
        _project: Option<Arc<ProjectModel>>,
        _engine: &ProjectEngine,
        _cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        panic!("resolver blew up");
    }
}

pub struct SlowResolver(pub Duration);

#[async_trait]
impl TagHelperResolver for SlowResolver {
    async fn resolve(
        &self,
        _project: Option<Arc<ProjectModel>>,
        _engine: &ProjectEngine,
        _cancel: CancellationToken,
    ) -> SnapshotResult<Vec<TagHelperDescriptor>> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}

// ============================================================================
// Projects and listeners
// ============================================================================

pub fn sample_tag_helpers() -> Vec<TagHelperDescriptor> {
    vec![
        TagHelperDescriptor::new("Acme.AnchorTagHelper", "Acme.Web")
            .with_rule("a")
            .with_attribute("asp-action", "System.String"),
        TagHelperDescriptor::new("Acme.FormTagHelper", "Acme.Web").with_rule("form"),
    ]
}

/// Project rooted at `<root>/repo/proj`, targeting net6.0, declaring `RazorExtension`
pub fn razor_project(root: &Path) -> ProjectInstance {
    let project_dir = root.join("repo").join("proj");
    ProjectInstance::new()
        .with_property(properties::INTERMEDIATE_OUTPUT_PATH, "obj/Debug")
        .with_property(properties::PROJECT_DIRECTORY, project_dir.display().to_string())
        .with_property(
            properties::PROJECT_FULL_PATH,
            project_dir.join("proj.csproj").display().to_string(),
        )
        .with_property(properties::TARGET_FRAMEWORK, "net6.0")
        .with_capability("RazorExtension")
}

pub fn listener(
    selector: Arc<ConfigurationSelector>,
    resolver: Arc<dyn TagHelperResolver>,
    models: Arc<InMemoryProjectModelStore>,
) -> Arc<ProjectLoadListener> {
    listener_with_settings(&Settings::default(), selector, resolver, models)
}

pub fn listener_with_settings(
    settings: &Settings,
    selector: Arc<ConfigurationSelector>,
    resolver: Arc<dyn TagHelperResolver>,
    models: Arc<InMemoryProjectModelStore>,
) -> Arc<ProjectLoadListener> {
    Arc::new(ProjectLoadListener::new(
        settings,
        selector,
        Arc::new(DefaultProjectEngineFactory),
        resolver,
        models,
    ))
}
