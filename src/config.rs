//! Configuration loaded from TOML.
//!
//! ```toml
//! [resolver]
//! endpoint = "https://api.languagetoolplus.com"
//! language = "en-GB"
//! timeout_secs = 30
//!
//! [limits]
//! max_document_bytes = 10485760
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Public LanguageTool API.
pub const DEFAULT_ENDPOINT: &str = "https://api.languagetoolplus.com";

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Upload limit of 10 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub limits: LimitsConfig,
}

/// Correction lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base URL of the LanguageTool server; `/v2/check` is appended.
    pub endpoint: String,
    /// Language tag sent with every lookup.
    pub language: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

/// Input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Packages larger than this are rejected before unpacking.
    pub max_document_bytes: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml(&contents)?;
                tracing::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }
}
