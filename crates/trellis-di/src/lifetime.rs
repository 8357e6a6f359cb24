//! Service lifetime policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DIError;

/// How many instances a registration produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// Service is created each time it's requested
    #[default]
    Transient,
    /// Service is created once and reused for the lifetime of the container
    Singleton,
}

impl Lifetime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Transient => "transient",
            Lifetime::Singleton => "singleton",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = DIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transient" | "instance" => Ok(Lifetime::Transient),
            "singleton" => Ok(Lifetime::Singleton),
            _ => Err(DIError::UnsupportedLifetime {
                lifetime: s.to_string(),
            }),
        }
    }
}
