//! Fallback configuration provider for pre-SDK projects
//!
//! Infers the MVC configuration from the version of the
//! `Microsoft.AspNetCore.Mvc.Razor` assembly found among the resolved
//! references.

use std::path::Path;

use crate::configuration::provider::{ConfigurationProvider, ConfigurationProviderContext};
use crate::configuration::RazorConfiguration;
use crate::project::properties::{items, metadata};

pub const MVC_RAZOR_ASSEMBLY: &str = "Microsoft.AspNetCore.Mvc.Razor.dll";

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackConfigurationProvider;

impl FallbackConfigurationProvider {
    /// Map an assembly version (`major.minor[.build[.revision]]`) to a configuration
    pub fn configuration_for_version(version: &str) -> Option<RazorConfiguration> {
        let mut parts = version.trim().split('.');
        let major: u32 = parts.next()?.parse().ok()?;
        let minor: u32 = parts.next().unwrap_or("0").parse().ok()?;

        match (major, minor) {
            (0, _) => None,
            (1, 0) => Some(RazorConfiguration::mvc_1_0()),
            (1, _) => Some(RazorConfiguration::mvc_1_1()),
            (2, 0) => Some(RazorConfiguration::mvc_2_0()),
            _ => Some(RazorConfiguration::mvc_2_1()),
        }
    }
}

impl ConfigurationProvider for FallbackConfigurationProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn try_resolve(
        &self,
        context: &ConfigurationProviderContext<'_>,
    ) -> Option<RazorConfiguration> {
        let reference = context
            .properties
            .items(items::REFERENCE_PATH)
            .iter()
            .find(|item| {
                // References may come from a Windows build: split on both separators
                let include = item.include.replace('\\', "/");
                Path::new(&include)
                    .file_name()
                    .is_some_and(|name| name.eq_ignore_ascii_case(MVC_RAZOR_ASSEMBLY))
            })?;

        Self::configuration_for_version(reference.metadata(metadata::VERSION))
    }
}
