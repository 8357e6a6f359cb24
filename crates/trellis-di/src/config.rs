//! Container configuration
//!
//! Options and bindings can be loaded from TOML, YAML or JSON files. A
//! binding names its service, optionally its implementation (absent means the
//! service binds to itself) and optionally its lifetime (absent means
//! transient). Names are turned into types through a
//! [`TypeCatalog`](crate::TypeCatalog).
//!
//! ```toml
//! [options]
//! detect_cycles = true
//!
//! [[binding]]
//! service = "Clock"
//! implementation = "SystemClock"
//! lifetime = "singleton"
//!
//! [[binding]]
//! service = "ReportService"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DIError, DIResult};

/// Environment variable overriding [`ContainerOptions::detect_cycles`].
pub const DETECT_CYCLES_ENV: &str = "TRELLIS_DETECT_CYCLES";

/// Behavioral switches of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// Fail with `CyclicDependency` when a service is re-entered while it is
    /// still being resolved. When off, a cycle never returns.
    pub detect_cycles: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
        }
    }
}

impl ContainerOptions {
    /// Default options with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup, ignoring unparsable values
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DETECT_CYCLES_ENV) {
            self.detect_cycles = value.trim().parse().unwrap_or(self.detect_cycles);
        }
        self
    }
}

/// One configured registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<String>,
}

impl BindingConfig {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Self::default()
        }
    }

    pub fn implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = Some(implementation.into());
        self
    }

    pub fn lifetime(mut self, lifetime: impl Into<String>) -> Self {
        self.lifetime = Some(lifetime.into());
        self
    }
}

/// Options plus the ordered list of bindings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub options: ContainerOptions,
    #[serde(rename = "binding", alias = "bindings")]
    pub bindings: Vec<BindingConfig>,
}

impl ContainerConfig {
    /// Load configuration from a file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> DIResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DIError::InvalidConfiguration {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(DIError::InvalidConfiguration {
                message: format!("Unsupported configuration format: {}", path.display()),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> DIResult<Self> {
        toml::from_str(content).map_err(|e| DIError::InvalidConfiguration {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    pub fn from_yaml_str(content: &str) -> DIResult<Self> {
        serde_yaml::from_str(content).map_err(|e| DIError::InvalidConfiguration {
            message: format!("Failed to parse YAML config: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> DIResult<Self> {
        serde_json::from_str(content).map_err(|e| DIError::InvalidConfiguration {
            message: format!("Failed to parse JSON config: {}", e),
        })
    }
}
