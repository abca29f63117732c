//! Core provider trait for Razor configuration resolution

use std::collections::BTreeSet;

use super::RazorConfiguration;
use crate::project::ProjectPropertyView;

/// Inputs handed to every provider in the chain
pub struct ConfigurationProviderContext<'a> {
    pub capabilities: &'a BTreeSet<String>,
    pub properties: &'a dyn ProjectPropertyView,
}

impl<'a> ConfigurationProviderContext<'a> {
    pub fn new(
        capabilities: &'a BTreeSet<String>,
        properties: &'a dyn ProjectPropertyView,
    ) -> Self {
        Self {
            capabilities,
            properties,
        }
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Attempts to resolve a project's Razor configuration.
///
/// Implementations hold no per-invocation state and must decide from the
/// context alone: no clocks, randomness or shared mutable state, so the same
/// inputs always yield the same answer.
pub trait ConfigurationProvider: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// `Some` when this provider recognizes the project
    fn try_resolve(&self, context: &ConfigurationProviderContext<'_>)
    -> Option<RazorConfiguration>;
}
