//! Repository configuration
//!
//! Stored as JSON at `<git-dir>/tessera.json`. A missing file means
//! defaults, which keep the object store byte-compatible with git.

use crate::store::{Compression, Compressor};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the config inside the git dir
pub const CONFIG_FILE: &str = "tessera.json";

/// Per-repository settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Stream codec for stored objects
    #[serde(default)]
    pub compression: Compression,
    /// Codec level; the codec's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_level: Option<i32>,
    /// Extra base names the tree builder skips
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl RepoConfig {
    /// Load config from a git dir
    pub fn load(git_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(git_dir);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: RepoConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config into a git dir
    pub fn save(&self, git_dir: &Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_path(git_dir), content)?;
        Ok(())
    }

    /// Get the config file path for a git dir
    pub fn config_path(git_dir: &Path) -> PathBuf {
        git_dir.join(CONFIG_FILE)
    }

    /// Compressor described by this config
    pub fn compressor(&self) -> Compressor {
        Compressor::new(self.compression, self.compression_level)
    }

    fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level {
            let range = match self.compression {
                Compression::Zlib => 0..=9,
                Compression::Zstd => 1..=22,
            };
            if !range.contains(&level) {
                return Err(Error::Config(format!(
                    "compression_level {} out of range {:?} for {:?}",
                    level, range, self.compression
                )));
            }
        }
        if let Some(bad) = self
            .ignore
            .iter()
            .find(|name| name.is_empty() || name.contains('/'))
        {
            return Err(Error::Config(format!(
                "ignore entries must be base names, got '{}'",
                bad
            )));
        }
        Ok(())
    }
}
