//! Provider ordering, fallback and determinism

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::common::{CapabilityProvider, DecliningProvider, selector_with};
use razorsnap::configuration::providers::{FallbackConfigurationProvider, SdkConfigurationProvider};
use razorsnap::project::properties::{items, metadata};
use razorsnap::{
    ConfigurationProvider, ConfigurationSelector, ProjectInstance, ProjectItem,
    ProjectPropertyView, ProviderRegistry, RazorConfiguration,
};

fn capabilities(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn swapping_two_matching_providers_changes_the_result() {
    let alpha: Arc<dyn ConfigurationProvider> = CapabilityProvider::new("Razor", "Alpha");
    let beta: Arc<dyn ConfigurationProvider> = CapabilityProvider::new("Razor", "Beta");
    let project = ProjectInstance::new();
    let caps = capabilities(&["Razor"]);

    let forward = selector_with(vec![alpha.clone(), beta.clone()]);
    let reverse = selector_with(vec![beta, alpha]);

    assert_eq!(
        forward.resolve(&caps, &project).unwrap().configuration_name,
        "Alpha"
    );
    assert_eq!(
        reverse.resolve(&caps, &project).unwrap().configuration_name,
        "Beta"
    );
}

#[test]
fn later_provider_matches_when_earlier_ones_decline() {
    let selector = selector_with(vec![
        Arc::new(DecliningProvider),
        CapabilityProvider::new("Other", "Other"),
        CapabilityProvider::new("Razor", "Razor"),
    ]);

    let result = selector.resolve(&capabilities(&["Razor"]), &ProjectInstance::new());
    assert_eq!(result.unwrap().configuration_name, "Razor");
}

#[test]
fn fallback_result_is_used_when_no_provider_matches() {
    let selector = selector_with(vec![Arc::new(DecliningProvider)]);
    let project = ProjectInstance::new().with_item(
        items::REFERENCE_PATH,
        ProjectItem::new("/nuget/Microsoft.AspNetCore.Mvc.Razor.dll")
            .with_metadata(metadata::VERSION, "1.1.3.0"),
    );

    let result = selector.resolve(&project.capabilities(), &project);
    assert_eq!(result, Some(RazorConfiguration::mvc_1_1()));
}

#[test]
fn absence_everywhere_is_none_not_an_error() {
    let selector = selector_with(vec![Arc::new(DecliningProvider)]);
    assert_eq!(selector.resolve(&BTreeSet::new(), &ProjectInstance::new()), None);
}

#[test]
fn registered_provider_shadows_fallback() {
    // Both could answer; the registered one is asked first
    let selector = selector_with(vec![CapabilityProvider::new("Razor", "Registered")]);
    let project = ProjectInstance::new()
        .with_capability("Razor")
        .with_item(
            items::REFERENCE_PATH,
            ProjectItem::new("/nuget/Microsoft.AspNetCore.Mvc.Razor.dll")
                .with_metadata(metadata::VERSION, "2.0.0.0"),
        );

    let result = selector.resolve(&project.capabilities(), &project);
    assert_eq!(result.unwrap().configuration_name, "Registered");
}

#[test]
fn resolution_is_deterministic() {
    let mut registry = ProviderRegistry::with_defaults();
    registry.add(CapabilityProvider::new("RazorExtension", "Extension"));
    let selector = ConfigurationSelector::new(registry, Arc::new(FallbackConfigurationProvider));
    let project = ProjectInstance::new().with_capability("RazorExtension");
    let caps = project.capabilities();

    let first = selector.resolve(&caps, &project);
    for _ in 0..16 {
        assert_eq!(selector.resolve(&caps, &project), first);
    }
}

#[test]
fn default_registry_order_is_stable() {
    let registry = ProviderRegistry::with_defaults();
    let names: Vec<_> = registry.providers().iter().map(|p| p.name()).collect();
    assert_eq!(names, [SdkConfigurationProvider.name()]);
}
