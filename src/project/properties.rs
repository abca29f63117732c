//! Well-known build property and item names

/// Intermediate output directory, relative to the project directory or absolute
pub const INTERMEDIATE_OUTPUT_PATH: &str = "IntermediateOutputPath";
pub const PROJECT_DIRECTORY: &str = "MSBuildProjectDirectory";
pub const PROJECT_FULL_PATH: &str = "MSBuildProjectFullPath";
pub const TARGET_FRAMEWORK: &str = "TargetFramework";
/// Legacy (non-SDK) projects only carry this one, e.g. `v4.7.2`
pub const TARGET_FRAMEWORK_VERSION: &str = "TargetFrameworkVersion";
/// Development only: `true` asks the listener to wait for a debugger
pub const DEBUG_WAIT: &str = "_DebugRazorSnapshot_";

pub const RAZOR_LANG_VERSION: &str = "RazorLangVersion";
pub const RAZOR_DEFAULT_CONFIGURATION: &str = "RazorDefaultConfiguration";

/// Item types
pub mod items {
    pub const PROJECT_CAPABILITY: &str = "ProjectCapability";
    pub const RAZOR_CONFIGURATION: &str = "RazorConfiguration";
    pub const REFERENCE_PATH: &str = "ReferencePath";
}

/// Item metadata names
pub mod metadata {
    pub const EXTENSIONS: &str = "Extensions";
    pub const VERSION: &str = "Version";
}
