//! NDK Installation Detection
//!
//! Finds the NDK to build with. Installers put it in different places
//! depending on their age and the platform, so several locations are tried in
//! a fixed order and the first hit wins:
//!
//! 1. an explicitly pinned path, when one is configured
//! 2. `$ANDROID_HOME/ndk-bundle`
//! 3. the newest release under `$ANDROID_HOME/ndk/<version>`
//! 4. `$NDK`, `$NDK_HOME`, `$NDK_ROOT`, `$ANDROID_NDK_HOME`

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::EnvSource;
use crate::error::{Result, ToolchainError};
use crate::version::newest;

/// Variable naming the Android SDK directory
pub const SDK_HOME_VAR: &str = "ANDROID_HOME";

/// Variables naming an NDK root directly, in priority order
pub const NDK_ROOT_VARS: &[&str] = &["NDK", "NDK_HOME", "NDK_ROOT", "ANDROID_NDK_HOME"];

const BUNDLE_DIR: &str = "ndk-bundle";
const VERSIONS_DIR: &str = "ndk";

/// Where an installation was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSource {
    Pinned,
    Bundle,
    Versioned(String),
    EnvVar(&'static str),
}

/// A located NDK installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub root: PathBuf,
    pub source: InstallSource,
}

impl Installation {
    /// Read `Pkg.Revision` from the installation's `source.properties`
    pub fn revision(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.root.join("source.properties")).ok()?;

        content
            .lines()
            .filter(|line| line.trim_start().starts_with("Pkg.Revision"))
            .find_map(|line| line.split('=').nth(1))
            .map(|v| v.trim().to_string())
    }
}

impl fmt::Display for InstallSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallSource::Pinned => f.write_str("pinned path"),
            InstallSource::Bundle => write!(f, "${}/{}", SDK_HOME_VAR, BUNDLE_DIR),
            InstallSource::Versioned(v) => write!(f, "${}/{}/{}", SDK_HOME_VAR, VERSIONS_DIR, v),
            InstallSource::EnvVar(var) => write!(f, "${}", var),
        }
    }
}

/// NDK installation detector
pub struct NdkDetector<'a, E: EnvSource> {
    env: &'a E,
    pinned: Option<PathBuf>,
}

impl<'a, E: EnvSource> NdkDetector<'a, E> {
    /// Create a detector reading variables from `env`
    pub fn new(env: &'a E) -> Self {
        Self { env, pinned: None }
    }

    /// Use this path instead of searching
    pub fn with_pinned(mut self, path: Option<PathBuf>) -> Self {
        self.pinned = path;
        self
    }

    /// Locate the NDK, or report every location tried
    pub fn locate(&self) -> Result<Installation> {
        let mut searched = Vec::new();

        if let Some(pinned) = &self.pinned {
            if pinned.exists() {
                return Ok(self.found(pinned.clone(), InstallSource::Pinned));
            }
            searched.push(pinned.display().to_string());
            return Err(ToolchainError::InstallationNotFound { searched });
        }

        match self.env.var(SDK_HOME_VAR) {
            Some(home) => {
                let home = PathBuf::from(home);

                let bundle = home.join(BUNDLE_DIR);
                if bundle.exists() {
                    return Ok(self.found(bundle, InstallSource::Bundle));
                }
                searched.push(bundle.display().to_string());

                let versions = home.join(VERSIONS_DIR);
                if let Some(version) = newest_version_dir(&versions) {
                    let root = versions.join(&version);
                    return Ok(self.found(root, InstallSource::Versioned(version)));
                }
                searched.push(versions.display().to_string());
            }
            None => {
                searched.push(format!("${}/{}", SDK_HOME_VAR, BUNDLE_DIR));
                searched.push(format!("${}/{}", SDK_HOME_VAR, VERSIONS_DIR));
            }
        }

        for &var in NDK_ROOT_VARS {
            match self.env.var(var) {
                Some(value) => {
                    let path = PathBuf::from(value);
                    if path.exists() {
                        return Ok(self.found(path, InstallSource::EnvVar(var)));
                    }
                    debug!("${} points at missing {:?}", var, path);
                    searched.push(path.display().to_string());
                }
                None => searched.push(format!("${}", var)),
            }
        }

        Err(ToolchainError::InstallationNotFound { searched })
    }

    fn found(&self, root: PathBuf, source: InstallSource) -> Installation {
        let installation = Installation { root, source };
        info!(
            "Found Android NDK {} at {:?} (via {})",
            installation.revision().unwrap_or_else(|| "unknown".to_string()),
            installation.root,
            installation.source
        );
        installation
    }
}

/// Name of the newest version-named subdirectory of `dir`
fn newest_version_dir(dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;
    let names: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();

    newest(names.iter().map(String::as_str)).map(str::to_string)
}
