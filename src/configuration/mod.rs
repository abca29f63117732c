//! Razor language configuration selection
//!
//! A project's configuration is picked by an ordered chain of providers with
//! a single fallback tried last (see [`selector::ConfigurationSelector`]).
//! The selected [`RazorConfiguration`] is immutable and embedded as-is in the
//! persisted snapshot.

pub mod provider;
pub mod providers;
pub mod registry;
pub mod selector;

pub use provider::{ConfigurationProvider, ConfigurationProviderContext};
pub use registry::ProviderRegistry;
pub use selector::ConfigurationSelector;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Razor language version, e.g. `2.1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RazorLanguageVersion {
    major: u32,
    minor: u32,
}

impl RazorLanguageVersion {
    pub const VERSION_1_0: Self = Self::new(1, 0);
    pub const VERSION_1_1: Self = Self::new(1, 1);
    pub const VERSION_2_0: Self = Self::new(2, 0);
    pub const VERSION_2_1: Self = Self::new(2, 1);
    pub const LATEST: Self = Self::VERSION_2_1;
    pub const EXPERIMENTAL: Self = Self::new(1337, 1337);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Parse `major.minor`, `Latest` or `Experimental`; `None` for anything else
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("latest") {
            return Some(Self::LATEST);
        }
        if value.eq_ignore_ascii_case("experimental") {
            return Some(Self::EXPERIMENTAL);
        }

        let (major, minor) = value.split_once('.')?;
        Some(Self::new(major.parse().ok()?, minor.parse().ok()?))
    }
}

impl fmt::Display for RazorLanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::EXPERIMENTAL {
            f.write_str("Experimental")
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl FromStr for RazorLanguageVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid Razor language version '{s}'"))
    }
}

impl Serialize for RazorLanguageVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RazorLanguageVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RazorExtension {
    pub extension_name: String,
}

impl RazorExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            extension_name: name.into(),
        }
    }
}

/// The Razor language configuration active for a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RazorConfiguration {
    pub configuration_name: String,
    pub language_version: RazorLanguageVersion,
    pub extensions: Vec<RazorExtension>,
}

impl RazorConfiguration {
    pub fn new(
        configuration_name: impl Into<String>,
        language_version: RazorLanguageVersion,
        extensions: Vec<RazorExtension>,
    ) -> Self {
        Self {
            configuration_name: configuration_name.into(),
            language_version,
            extensions,
        }
    }

    /// Pre-SDK MVC configuration whose single extension shares its name
    fn mvc(name: &str, version: RazorLanguageVersion) -> Self {
        Self::new(name, version, vec![RazorExtension::new(name)])
    }

    pub fn mvc_1_0() -> Self {
        Self::mvc("MVC-1.0", RazorLanguageVersion::VERSION_1_0)
    }

    pub fn mvc_1_1() -> Self {
        Self::mvc("MVC-1.1", RazorLanguageVersion::VERSION_1_1)
    }

    pub fn mvc_2_0() -> Self {
        Self::mvc("MVC-2.0", RazorLanguageVersion::VERSION_2_0)
    }

    pub fn mvc_2_1() -> Self {
        Self::mvc("MVC-2.1", RazorLanguageVersion::VERSION_2_1)
    }
}
