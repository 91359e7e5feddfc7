//! NDK Toolchain Catalog
//!
//! Static metadata for every target architecture the NDK can build for.

use std::fmt;
use std::str::FromStr;

use crate::error::ToolchainError;

/// Target architecture, named the way the build driver names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm,
    Arm64,
    X86,
    X86_64,
}

/// Toolchain metadata for one target architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSpec {
    pub arch: Arch,
    /// ABI name as used in APK lib directories
    pub abi: &'static str,
    /// Lowest API level the NDK supports for this architecture
    pub min_api: u32,
    /// Prefix of binutils-style tools and of the sysroot lib directory
    pub tool_prefix: &'static str,
    /// Prefix of the API-suffixed clang wrappers
    pub clang_prefix: &'static str,
}

static CATALOG: [ToolchainSpec; 4] = [
    ToolchainSpec {
        arch: Arch::Arm,
        abi: "armeabi-v7a",
        min_api: 16,
        tool_prefix: "arm-linux-androideabi",
        clang_prefix: "armv7a-linux-androideabi",
    },
    ToolchainSpec {
        arch: Arch::Arm64,
        abi: "arm64-v8a",
        min_api: 21,
        tool_prefix: "aarch64-linux-android",
        clang_prefix: "aarch64-linux-android",
    },
    ToolchainSpec {
        arch: Arch::X86,
        abi: "x86",
        min_api: 16,
        tool_prefix: "i686-linux-android",
        clang_prefix: "i686-linux-android",
    },
    ToolchainSpec {
        arch: Arch::X86_64,
        abi: "x86_64",
        min_api: 21,
        tool_prefix: "x86_64-linux-android",
        clang_prefix: "x86_64-linux-android",
    },
];

impl Arch {
    /// Get the identifier the build driver uses for this architecture
    pub fn id(&self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::X86 => "386",
            Arch::X86_64 => "amd64",
        }
    }

    /// Get the toolchain metadata for this architecture
    pub fn spec(&self) -> &'static ToolchainSpec {
        let index = match self {
            Arch::Arm => 0,
            Arch::Arm64 => 1,
            Arch::X86 => 2,
            Arch::X86_64 => 3,
        };
        &CATALOG[index]
    }

    /// Whether this is the 32-bit ARM target that needs an ABI revision hint
    pub fn is_arm32(&self) -> bool {
        matches!(self, Arch::Arm)
    }

    /// Get all supported architectures
    pub fn all() -> &'static [Arch] {
        &[Arch::Arm, Arch::Arm64, Arch::X86, Arch::X86_64]
    }
}

impl FromStr for Arch {
    type Err = ToolchainError;

    /// Accepts the build driver identifier or the ABI name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm" | "armeabi-v7a" => Ok(Arch::Arm),
            "arm64" | "arm64-v8a" => Ok(Arch::Arm64),
            "386" | "x86" => Ok(Arch::X86),
            "amd64" | "x86_64" => Ok(Arch::X86_64),
            other => Err(ToolchainError::UnsupportedArchitecture(other.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Look up the toolchain metadata for an architecture identifier.
pub fn toolchain_spec(id: &str) -> Result<&'static ToolchainSpec, ToolchainError> {
    id.parse::<Arch>().map(|arch| arch.spec())
}
