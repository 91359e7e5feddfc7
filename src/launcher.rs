//! Child process launcher
//!
//! Runs the wrapped build command with the host environment plus the resolved
//! overrides, sharing this process's stdin, stdout and stderr.

use std::process::{ExitStatus, Stdio};

use ndkenv_android_toolchain::EnvironmentSet;
use ndkenv_core::{NdkEnvError, Result};
use tokio::process::Command;
use tracing::debug;

/// Run `program` to completion under `env`.
pub async fn launch(program: &str, args: &[String], env: &EnvironmentSet) -> Result<ExitStatus> {
    debug!("Launching {} {:?}", program, args);

    Command::new(program)
        .args(args)
        .envs(env.iter())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| NdkEnvError::Launch {
            program: program.to_string(),
            source,
        })
}

/// Exit code that mirrors the child's status.
///
/// A child killed by a signal maps to `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
