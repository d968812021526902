//! Configuration file support.
//!
//! An optional TOML file supplies defaults for the transcription settings;
//! command-line flags override it. Missing fields fall back to the
//! `defaults` module values.

use crate::defaults;
use crate::error::{ChunkscribeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked for when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "chunkscribe.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
}

/// Transcription settings, `[stt]` in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
    pub threads: Option<usize>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields use default values; invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ChunkscribeError::InvalidArgument {
            message: format!("invalid config file {}: {}", path.display(), e),
        })
    }

    /// Load configuration for a run.
    ///
    /// An explicitly given path must exist and parse. With no explicit path
    /// the default location is used when present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
