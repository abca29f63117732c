//! Provider registry for Razor configuration providers

use std::sync::Arc;

use super::provider::ConfigurationProvider;
use super::providers::SdkConfigurationProvider;

/// Ordered list of configuration providers, first match wins
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ConfigurationProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registry holding the built-in providers in their standard order
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(Arc::new(SdkConfigurationProvider));
        registry
    }

    /// Append a provider; it is consulted after every provider added before it
    pub fn add(&mut self, provider: Arc<dyn ConfigurationProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[Arc<dyn ConfigurationProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.name()))
            .finish()
    }
}
