//! ndkenv - run builds inside an Android NDK cross-compilation environment
//!
//! Finds an installed NDK, works out the compiler wrappers and sysroot paths
//! for a target architecture, and runs a build command (typically `go build`)
//! with `GOOS`, `GOARCH`, `CC`, `CXX`, `CGO_ENABLED` and the cgo flag
//! variables pointing at that NDK.
//!
//! ## Architecture
//!
//! - `ndkenv-android-toolchain`: NDK detection, path resolution and
//!   environment synthesis
//! - `ndkenv-core`: configuration file and shared error type
//! - this crate: command line and child process launcher

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod launcher;

pub use ndkenv_android_toolchain as toolchain;
pub use ndkenv_core as core;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::RunCommand;
    pub use ndkenv_android_toolchain::{resolve, Arch, EnvironmentSet, HostPlatform, NdkDetector};
    pub use ndkenv_core::config::AppConfig;
}
