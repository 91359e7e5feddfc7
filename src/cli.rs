//! Command-line interface definition

use std::path::PathBuf;

use clap::Parser;

/// Run a build command inside an Android NDK cross-compilation environment.
///
/// The NDK is looked up in $ANDROID_HOME/ndk-bundle, the newest
/// $ANDROID_HOME/ndk/<version>, then $NDK, $NDK_HOME, $NDK_ROOT and
/// $ANDROID_NDK_HOME.
#[derive(Parser, Debug)]
#[command(name = "ndkenv", version, about)]
pub struct Cli {
    /// Android API level of the target platform libraries
    #[arg(short, long, value_name = "N", env = "NDKENV_API_LEVEL")]
    pub level: Option<u32>,

    /// Target architecture (arm, arm64, 386, amd64)
    #[arg(short, long, env = "GOARCH")]
    pub arch: Option<String>,

    /// Use this NDK instead of searching for one
    #[arg(long, value_name = "DIR")]
    pub ndk: Option<PathBuf>,

    /// Read settings from this file instead of the default config.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Don't prepend NDK include and library paths to CGO_*FLAGS
    #[arg(long)]
    pub no_flags: bool,

    /// Print the environment as shell exports instead of running a command
    #[arg(long)]
    pub print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to run, with its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
