//! Built-in Razor configuration providers
//!
//! SDK-style projects describe their configuration through build properties
//! and items. Older projects are recognized by the MVC Razor assembly they
//! reference, which is what the fallback looks at.

pub mod fallback;
pub mod sdk;

pub use fallback::FallbackConfigurationProvider;
pub use sdk::SdkConfigurationProvider;
