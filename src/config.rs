//! Scorer and server configuration
//!
//! Values come from defaults, then environment variables; binaries let CLI
//! flags override both.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How unresolved ids are treated by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupPolicy {
    /// Unknown ids contribute nothing (neutral score)
    #[default]
    Lenient,
    /// Unknown ids are reported as `ScoringError`
    Strict,
}

impl FromStr for LookupPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(LookupPolicy::Lenient),
            "strict" => Ok(LookupPolicy::Strict),
            _ => Err(ConfigError::InvalidLookupPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for LookupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupPolicy::Lenient => f.write_str("lenient"),
            LookupPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Scorer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub lookup_policy: LookupPolicy,
    /// Catalog JSON to load instead of the embedded one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl ScorerConfig {
    pub fn strict() -> Self {
        Self {
            lookup_policy: LookupPolicy::Strict,
            ..Self::default()
        }
    }

    /// Read `LOOKUP_POLICY` and `CATALOG_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup_policy = match lookup("LOOKUP_POLICY") {
            Some(value) => value.parse()?,
            None => LookupPolicy::default(),
        };
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            lookup_policy,
            catalog_path,
        })
    }
}

/// HTTP server settings (`api` feature)
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub scorer: ScorerConfig,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Scorer settings plus `PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let scorer = ScorerConfig::from_lookup(&lookup)?;
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => 3000,
        };
        Ok(Self { scorer, port })
    }
}
