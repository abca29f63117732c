//! Razor SDK project configuration provider
//!
//! Projects built with the Razor SDK declare the
//! `DotNetCoreRazorConfiguration` capability and describe the active
//! configuration through `RazorDefaultConfiguration`, `RazorLangVersion` and
//! a matching `RazorConfiguration` item whose `Extensions` metadata lists the
//! extension names.

use crate::configuration::provider::{ConfigurationProvider, ConfigurationProviderContext};
use crate::configuration::{RazorConfiguration, RazorExtension, RazorLanguageVersion};
use crate::project::properties::{self, items, metadata};

/// Capability declared by Razor SDK projects
pub const SDK_CAPABILITY: &str = "DotNetCoreRazorConfiguration";

#[derive(Debug, Clone, Copy, Default)]
pub struct SdkConfigurationProvider;

impl ConfigurationProvider for SdkConfigurationProvider {
    fn name(&self) -> &'static str {
        "sdk"
    }

    fn try_resolve(
        &self,
        context: &ConfigurationProviderContext<'_>,
    ) -> Option<RazorConfiguration> {
        if !context.has_capability(SDK_CAPABILITY) {
            return None;
        }

        let project = context.properties;
        let name = project
            .property(properties::RAZOR_DEFAULT_CONFIGURATION)
            .trim();
        if name.is_empty() {
            return None;
        }

        let language_version =
            RazorLanguageVersion::parse(project.property(properties::RAZOR_LANG_VERSION))?;

        let item = project
            .items(items::RAZOR_CONFIGURATION)
            .iter()
            .find(|item| item.include.trim() == name)?;

        let extensions = item
            .metadata(metadata::EXTENSIONS)
            .split(';')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(RazorExtension::new)
            .collect();

        Some(RazorConfiguration::new(name, language_version, extensions))
    }
}
