//! First-match-wins selection over the provider chain

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::provider::{ConfigurationProvider, ConfigurationProviderContext};
use super::providers::FallbackConfigurationProvider;
use super::{ProviderRegistry, RazorConfiguration};
use crate::project::ProjectPropertyView;

/// Picks the single applicable configuration for a project.
///
/// Registered providers are tried in order and the first match wins. The
/// fallback is consulted exactly once, only after every registered provider
/// declined. When even the fallback declines the result is `None`, which
/// callers treat as "configuration unknown", not as an error.
#[derive(Clone)]
pub struct ConfigurationSelector {
    registry: ProviderRegistry,
    fallback: Arc<dyn ConfigurationProvider>,
}

impl Default for ConfigurationSelector {
    fn default() -> Self {
        Self::new(
            ProviderRegistry::with_defaults(),
            Arc::new(FallbackConfigurationProvider),
        )
    }
}

impl ConfigurationSelector {
    pub fn new(registry: ProviderRegistry, fallback: Arc<dyn ConfigurationProvider>) -> Self {
        Self { registry, fallback }
    }

    pub fn resolve(
        &self,
        capabilities: &BTreeSet<String>,
        properties: &dyn ProjectPropertyView,
    ) -> Option<RazorConfiguration> {
        let context = ConfigurationProviderContext::new(capabilities, properties);

        for provider in self.registry.providers() {
            if let Some(configuration) = provider.try_resolve(&context) {
                debug!(
                    provider = provider.name(),
                    configuration = %configuration.configuration_name,
                    "Razor configuration resolved"
                );
                return Some(configuration);
            }
        }

        let configuration = self.fallback.try_resolve(&context);
        match &configuration {
            Some(configuration) => debug!(
                provider = self.fallback.name(),
                configuration = %configuration.configuration_name,
                "Razor configuration resolved by fallback"
            ),
            None => debug!("No Razor configuration provider matched"),
        }
        configuration
    }
}
