// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Any invalid field results in a ConfigError that rejects the whole file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, MapshareError, MapshareResult};
use crate::types::{RegionSize, MAX_SIZE};

/// Raw region settings as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegionConfig {
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default = "default_size")]
    default_size: u64,
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_size() -> u64 {
    1024 * 1024 // 1MB
}

impl Default for RawRegionConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            default_size: default_size(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    region: RawRegionConfig,
}

/// Validated region configuration.
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Directory holding backing files with implied names.
    pub directory: PathBuf,
    pub default_size: RegionSize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(default_directory()),
            default_size: RegionSize::new_unchecked(default_size()),
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub region: RegionConfig,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> MapshareResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MapshareError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MapshareError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> MapshareResult<Config> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| MapshareError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> MapshareResult<Config> {
        let region = Self::validate_region(raw.region)?;
        Ok(Config { region })
    }

    fn validate_region(raw: RawRegionConfig) -> Result<RegionConfig, ConfigError> {
        if raw.directory.trim().is_empty() {
            return Err(ConfigError::InvalidFieldValue {
                field: "directory",
                value: raw.directory,
                reason: "Directory cannot be empty".to_string(),
            });
        }

        if raw.directory.contains('\0') {
            return Err(ConfigError::InvalidFieldValue {
                field: "directory",
                value: raw.directory.escape_default().to_string(),
                reason: "Directory cannot contain NUL bytes".to_string(),
            });
        }

        let default_size =
            RegionSize::new(raw.default_size).map_err(|_| ConfigError::InvalidFieldValue {
                field: "default_size",
                value: raw.default_size.to_string(),
                reason: format!("Must be between 1 and {} bytes", MAX_SIZE),
            })?;

        Ok(RegionConfig {
            directory: PathBuf::from(raw.directory),
            default_size,
        })
    }
}
