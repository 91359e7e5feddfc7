//! Error types for NDK discovery and environment synthesis.

use std::path::PathBuf;
use thiserror::Error;

/// Release that fixed the Windows `clang++` packaging defect.
pub const MIN_NDK_RELEASE: &str = "r19c";

/// Command that updates an SDK-managed NDK.
pub const UPDATE_COMMAND: &str = "sdkmanager --update";

/// Toolchain errors
#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("no Android NDK found in {}", display_locations(.searched))]
    InstallationNotFound { searched: Vec<String> },

    #[error("cannot find {tool} compiler for {arch} in {}: {reason}", .dir.display())]
    CompilerProbe {
        arch: String,
        tool: String,
        dir: PathBuf,
        reason: String,
    },

    #[error("incomplete NDK for {arch}: {} is missing. {remediation}", .missing.display())]
    ToolchainIncomplete {
        arch: String,
        missing: PathBuf,
        remediation: String,
    },

    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("unsupported host platform: {os}/{arch}")]
    UnsupportedHost { os: String, arch: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for toolchain operations
pub type Result<T> = std::result::Result<T, ToolchainError>;

impl ToolchainError {
    /// Build a `ToolchainIncomplete` carrying the standard remediation text.
    pub fn incomplete(arch: impl Into<String>, missing: impl Into<PathBuf>) -> Self {
        ToolchainError::ToolchainIncomplete {
            arch: arch.into(),
            missing: missing.into(),
            remediation: format!(
                "Make sure your NDK version is >= {}. Use `{}` to update it.",
                MIN_NDK_RELEASE, UPDATE_COMMAND
            ),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolchainError::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_locations(locations: &[String]) -> String {
    match locations {
        [] => "no location".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} nor in {}", init.join(", "), last),
    }
}
