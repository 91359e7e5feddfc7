//! Error types for ndkenv
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use ndkenv_android_toolchain::ToolchainError;
use thiserror::Error;

/// Main error type for ndkenv
#[derive(Error, Debug)]
pub enum NdkEnvError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error in {}: {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("missing arguments: no command to run")]
    MissingArguments,

    #[error("no target architecture: set $GOARCH or pass --arch")]
    MissingArchitecture,

    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for ndkenv operations
pub type Result<T> = std::result::Result<T, NdkEnvError>;

impl NdkEnvError {
    /// Whether the error means the command line itself was incomplete
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            NdkEnvError::MissingArguments | NdkEnvError::MissingArchitecture
        )
    }

    /// Process exit status to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NdkEnvError::Launch { source, .. } if source.kind() == std::io::ErrorKind::NotFound => 127,
            NdkEnvError::Launch { .. } => 126,
            _ => 1,
        }
    }
}
