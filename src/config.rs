//! Gossip configuration management
//!
//! Configuration is optional: every knob has a default and the config file
//! (`~/.gossip/config.toml`, or an explicit `--config` path) only needs to
//! name the values it overrides.

use crate::error::{Error, Result};
use crate::record::FORMAT_VERSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default soft ceiling for aggregate attachment size (5 MB).
///
/// Exceeding it yields a warning, never a rejection; the format has no hard
/// payload cap of its own.
pub const DEFAULT_SOFT_CEILING_BYTES: u64 = 5 * 1024 * 1024;

/// Main Gossip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GossipConfig {
    /// Aggregate attachment size above which validation emits a
    /// `LargePayload` warning
    #[serde(default = "default_soft_ceiling")]
    pub soft_ceiling_bytes: u64,

    /// Write pretty-printed canonical JSON on save; disable for the
    /// compact form
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Value stamped into `metadata.created_by` for new records
    #[serde(default = "default_created_by")]
    pub created_by: String,
}

fn default_soft_ceiling() -> u64 {
    DEFAULT_SOFT_CEILING_BYTES
}

fn default_true() -> bool {
    true
}

fn default_created_by() -> String {
    format!("gossip-rs {}", FORMAT_VERSION)
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            soft_ceiling_bytes: default_soft_ceiling(),
            pretty: true,
            created_by: default_created_by(),
        }
    }
}

impl GossipConfig {
    /// Default config file location (`~/.gossip/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|h| h.join(".gossip").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used when present, else built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
