//! NDK Path Resolution
//!
//! Maps an installation root and a [`ToolchainSpec`] to the concrete files the
//! cross-compile environment points at. Compiler wrappers carry their API
//! level in the filename (`aarch64-linux-android21-clang`), and which levels
//! ship differs between NDK releases, so the compiler path is found by
//! probing the bin directory rather than by formatting a name.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ToolchainError};
use crate::ndk::ToolchainSpec;

/// Operating system of the machine running the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    Darwin,
    Windows,
}

/// CPU architecture of the machine running the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArch {
    X86,
    X86_64,
    Aarch64,
}

/// The build host. Selects the `prebuilt/<tag>` directory inside the NDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: HostOs,
    pub arch: HostArch,
}

impl HostPlatform {
    pub fn new(os: HostOs, arch: HostArch) -> Self {
        Self { os, arch }
    }

    /// Detect the platform this binary runs on
    pub fn current() -> Result<Self> {
        let unsupported = || ToolchainError::UnsupportedHost {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        };

        let os = match std::env::consts::OS {
            "linux" => HostOs::Linux,
            "macos" => HostOs::Darwin,
            "windows" => HostOs::Windows,
            _ => return Err(unsupported()),
        };
        let arch = match std::env::consts::ARCH {
            "x86" => HostArch::X86,
            "x86_64" => HostArch::X86_64,
            "aarch64" => HostArch::Aarch64,
            _ => return Err(unsupported()),
        };

        Ok(Self { os, arch })
    }

    /// Get the NDK prebuilt directory name for this host
    pub fn tag(&self) -> Result<String> {
        match (self.os, self.arch) {
            // 32-bit Windows NDKs used a bare tag.
            (HostOs::Windows, HostArch::X86) => Ok("windows".to_string()),
            // Apple silicon runs the x86_64 toolchain under Rosetta.
            (HostOs::Darwin, HostArch::Aarch64) => Ok("darwin-x86_64".to_string()),
            (os, HostArch::X86) => Ok(format!("{}-x86", os.name())),
            (os, HostArch::X86_64) => Ok(format!("{}-x86_64", os.name())),
            (os, arch) => Err(ToolchainError::UnsupportedHost {
                os: os.name().to_string(),
                arch: format!("{:?}", arch).to_lowercase(),
            }),
        }
    }
}

impl HostOs {
    fn name(&self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::Darwin => "darwin",
            HostOs::Windows => "windows",
        }
    }
}

/// Why a compiler probe found nothing usable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    #[error("no file matches {prefix}<api>-{tool}")]
    NoMatch { prefix: String, tool: String },
    #[error("can't find '-' after the API level in {0}")]
    MissingSeparator(String),
    #[error("invalid API level {level:?} in {name}")]
    InvalidLevel { name: String, level: String },
}

/// Find the smallest API level embedded in compiler wrapper names.
///
/// Considers every name that starts with `prefix` and contains `tool`; the
/// level is the text between the prefix and the next `-`. A matching name
/// that doesn't have that shape is an error, not a skip.
pub fn probe_api_level<'a, I>(names: I, prefix: &str, tool: &str) -> std::result::Result<u32, ProbeFailure>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lowest: Option<u32> = None;

    for name in names {
        if !name.starts_with(prefix) || !name.contains(tool) {
            continue;
        }

        let rest = &name[prefix.len()..];
        let dash = rest
            .find('-')
            .ok_or_else(|| ProbeFailure::MissingSeparator(name.to_string()))?;
        let level: u32 = rest[..dash].parse().map_err(|_| ProbeFailure::InvalidLevel {
            name: name.to_string(),
            level: rest[..dash].to_string(),
        })?;

        lowest = Some(lowest.map_or(level, |l| l.min(level)));
    }

    lowest.ok_or_else(|| ProbeFailure::NoMatch {
        prefix: prefix.to_string(),
        tool: tool.to_string(),
    })
}

/// Path layout of one NDK installation on one host
#[derive(Debug, Clone)]
pub struct NdkPaths {
    root: PathBuf,
    host_tag: String,
}

impl NdkPaths {
    /// Create a resolver for an installation root
    pub fn new(root: impl Into<PathBuf>, host: &HostPlatform) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            host_tag: host.tag()?,
        })
    }

    /// Get the installation root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the host tag used under `toolchains/llvm/prebuilt`
    pub fn host_tag(&self) -> &str {
        &self.host_tag
    }

    fn prebuilt_dir(&self) -> PathBuf {
        self.root
            .join("toolchains")
            .join("llvm")
            .join("prebuilt")
            .join(&self.host_tag)
    }

    /// Directory holding clang and the binutils replacements
    pub fn bin_dir(&self) -> PathBuf {
        self.prebuilt_dir().join("bin")
    }

    /// System header directory of the unified sysroot
    pub fn include_dir(&self) -> PathBuf {
        self.prebuilt_dir().join("sysroot").join("usr").join("include")
    }

    /// Library directory for an architecture at a target API level
    pub fn library_dir(&self, spec: &ToolchainSpec, api_level: u32) -> PathBuf {
        self.prebuilt_dir()
            .join("sysroot")
            .join("usr")
            .join("lib")
            .join(spec.tool_prefix)
            .join(api_level.to_string())
    }

    /// Path of a non-compiler tool such as `ar` or `ld`
    pub fn tool_path(&self, spec: &ToolchainSpec, tool: &str) -> PathBuf {
        self.bin_dir().join(format!("{}-{}", spec.tool_prefix, tool))
    }

    /// Path of a compiler wrapper (`clang` or `clang++`), found by probing.
    ///
    /// Uses the lowest API level shipped in the bin directory, raised to the
    /// architecture's own minimum when that is higher.
    pub fn compiler_path(&self, spec: &ToolchainSpec, tool: &str) -> Result<PathBuf> {
        let bin = self.bin_dir();
        let names = list_files(&bin).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolchainError::incomplete(spec.arch.id(), &bin),
            _ => ToolchainError::io(&bin, e),
        })?;

        let found = probe_api_level(names.iter().map(String::as_str), spec.clang_prefix, tool)
            .map_err(|failure| ToolchainError::CompilerProbe {
                arch: spec.arch.id().to_string(),
                tool: tool.to_string(),
                dir: bin.clone(),
                reason: failure.to_string(),
            })?;

        let level = found.max(spec.min_api);
        debug!(arch = %spec.arch, tool, found, level, "Probed compiler API level");

        Ok(bin.join(format!("{}{}-{}", spec.clang_prefix, level, tool)))
    }
}

impl fmt::Display for NdkPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.root.display(), self.host_tag)
    }
}

/// Names of the regular (non-directory) entries in `dir`
fn list_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
