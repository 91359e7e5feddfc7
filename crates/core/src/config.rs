//! Application Configuration
//!
//! Optional user settings read from `config.toml`:
//! - a pinned NDK installation
//! - the default target API level and architecture
//! - whether cgo search flags are added
//!
//! The file is only ever read. A missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use ndkenv_android_toolchain::DEFAULT_API_LEVEL;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{NdkEnvError, Result};

/// Android NDK configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AndroidConfig {
    /// Use this NDK instead of searching for one
    pub ndk_path: Option<PathBuf>,
    /// Default target API level
    pub api_level: u32,
    /// Default target architecture when `$GOARCH` is unset
    pub arch: Option<String>,
    /// Prepend NDK include and library paths to the cgo flag variables
    pub cgo_flags: bool,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            ndk_path: None,
            api_level: DEFAULT_API_LEVEL,
            arch: None,
            cgo_flags: true,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Android NDK settings
    pub android: AndroidConfig,
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ndkenv").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load the default configuration file, falling back to defaults
    pub async fn load() -> Result<Self> {
        match Self::config_file() {
            Some(path) if path.exists() => Self::load_from(&path).await,
            _ => {
                debug!("Config file not found, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    /// Load configuration from an explicit file, which must exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            NdkEnvError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config = Self::parse(path, &contents)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| NdkEnvError::TomlParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
