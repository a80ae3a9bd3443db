//! Devices and platforms

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target platform of a device or an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    /// Any platform the orchestrator has no special handling for
    Other(String),
}

impl Platform {
    /// Canonical platform name, as used in build paths and command templates
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Other(name) => name,
        }
    }

    /// Whether this platform belongs to the iOS family
    pub fn is_ios(&self) -> bool {
        match self {
            Platform::Ios => true,
            Platform::Other(name) => name.eq_ignore_ascii_case("ios"),
            Platform::Android => false,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Platform name cannot be empty".to_string());
        }

        match trimmed.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            _ => Ok(Platform::Other(trimmed.to_string())),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A connected or virtual execution target.
///
/// Owned by whoever discovered it; the orchestrator only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Stable device identifier
    pub identifier: String,

    /// Platform the device runs
    pub platform: Platform,

    /// Emulator or simulator rather than physical hardware
    #[serde(default)]
    pub is_emulator: bool,
}

impl Device {
    pub fn new(identifier: impl Into<String>, platform: Platform, is_emulator: bool) -> Self {
        Self {
            identifier: identifier.into(),
            platform,
            is_emulator,
        }
    }
}
