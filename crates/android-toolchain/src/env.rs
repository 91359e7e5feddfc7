//! Cross-Compile Environment
//!
//! Turns a located NDK into the variables a build driver needs to target one
//! Android architecture: target OS and arch, the C and C++ compilers, cgo
//! enablement and, on request, include and library search flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{Result, ToolchainError};
use crate::ndk::{Arch, ToolchainSpec};
use crate::paths::{HostOs, HostPlatform, NdkPaths};

pub const GOOS: &str = "GOOS";
pub const GOARCH: &str = "GOARCH";
pub const GOARM: &str = "GOARM";
pub const CC: &str = "CC";
pub const CXX: &str = "CXX";
pub const CGO_ENABLED: &str = "CGO_ENABLED";
pub const CGO_CFLAGS: &str = "CGO_CFLAGS";
pub const CGO_CXXFLAGS: &str = "CGO_CXXFLAGS";
pub const CGO_LDFLAGS: &str = "CGO_LDFLAGS";

/// Source of inherited environment variables
pub trait EnvSource {
    /// Value of `key`, or `None` when unset or empty
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Ordered variable overrides for one target architecture.
///
/// Applied on top of the inherited host environment. Keys are unique; the
/// set can't be changed once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    vars: IndexMap<String, String>,
}

impl EnvironmentSet {
    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_string(), value.into());
    }

    /// Get a variable's value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// `KEY=value` strings in insertion order
    pub fn assignments(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }

    /// Get shell commands that export every variable.
    ///
    /// POSIX values are single-quoted so the output can be `eval`'d verbatim.
    pub fn shell_exports(&self, os: HostOs) -> String {
        let mut exports = String::new();

        for (key, value) in self.iter() {
            if os == HostOs::Windows {
                exports.push_str(&format!("set {}={}\n", key, value));
            } else {
                exports.push_str(&format!("export {}={}\n", key, single_quote(value)));
            }
        }

        exports
    }
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds [`EnvironmentSet`]s for one installation on one host
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    paths: NdkPaths,
    host: HostPlatform,
}

impl EnvironmentBuilder {
    /// Create a builder for an installation root
    pub fn new(root: impl Into<PathBuf>, host: HostPlatform) -> Result<Self> {
        Ok(Self {
            paths: NdkPaths::new(root, &host)?,
            host,
        })
    }

    /// Get the path resolver
    pub fn paths(&self) -> &NdkPaths {
        &self.paths
    }

    /// Compiler selection for `arch`, validated against the installation.
    ///
    /// Fails with `ToolchainIncomplete` when a compiler wrapper or the
    /// library directory for `api_level` is missing.
    pub fn build(&self, arch: Arch, api_level: u32) -> Result<EnvironmentSet> {
        let spec = arch.spec();
        let clang = self.paths.compiler_path(spec, "clang")?;
        let clangxx = self.paths.compiler_path(spec, "clang++")?;

        let mut required = vec![clang.clone(), clangxx.clone()];
        if self.host.os == HostOs::Windows {
            // r19b shipped without the clang++.cmd wrapper, r19c fixed it.
            required.push(with_suffix(&clangxx, ".cmd"));
        }
        required.push(self.paths.library_dir(spec, api_level));

        for path in &required {
            ensure_exists(spec, path)?;
        }

        let mut env = EnvironmentSet::default();
        env.set(GOOS, "android");
        env.set(GOARCH, arch.id());
        env.set(CC, clang.to_string_lossy());
        env.set(CXX, clangxx.to_string_lossy());
        env.set(CGO_ENABLED, "1");
        if arch.is_arm32() {
            env.set(GOARM, "7");
        }

        info!(arch = %arch, api_level, ndk = %self.paths, "Resolved cross-compile environment");
        Ok(env)
    }

    /// Like [`build`](Self::build), plus cgo search flags.
    ///
    /// The include and library directories are prepended to whatever
    /// `inherited` holds for the same variables.
    pub fn build_with_flags(
        &self,
        arch: Arch,
        api_level: u32,
        inherited: &impl EnvSource,
    ) -> Result<EnvironmentSet> {
        let mut env = self.build(arch, api_level)?;
        let spec = arch.spec();

        let include = format!("-I{}", self.paths.include_dir().display());
        let libs = format!("-L{}", self.paths.library_dir(spec, api_level).display());

        env.set(CGO_CFLAGS, prepend(&include, inherited.var(CGO_CFLAGS)));
        env.set(CGO_CXXFLAGS, prepend(&include, inherited.var(CGO_CXXFLAGS)));
        env.set(CGO_LDFLAGS, prepend(&libs, inherited.var(CGO_LDFLAGS)));

        debug!(arch = %arch, "Added cgo search flags");
        Ok(env)
    }
}

fn ensure_exists(spec: &ToolchainSpec, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolchainError::incomplete(spec.arch.id(), path))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

fn prepend(flag: &str, existing: Option<String>) -> String {
    match existing {
        Some(existing) => format!("{} {}", flag, existing),
        None => flag.to_string(),
    }
}
