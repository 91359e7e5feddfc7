//! Android NDK Toolchain Resolution
//!
//! Locates an installed NDK and prepares the environment a build driver needs
//! to cross-compile for one Android architecture:
//! - Release version ordering for picking the newest install
//! - Per-architecture toolchain catalog
//! - Installation detection from environment variables and SDK layout
//! - Host-aware path resolution, including compiler probing
//! - Environment synthesis with completeness checks

pub mod detector;
pub mod env;
pub mod error;
pub mod ndk;
pub mod paths;
pub mod version;

use std::path::Path;

pub use detector::{InstallSource, Installation, NdkDetector};
pub use env::{EnvSource, EnvironmentBuilder, EnvironmentSet, ProcessEnv};
pub use error::{Result, ToolchainError};
pub use ndk::{toolchain_spec, Arch, ToolchainSpec};
pub use paths::{probe_api_level, HostArch, HostOs, HostPlatform, NdkPaths};
pub use version::compare_versions;

/// Default target API level
pub const DEFAULT_API_LEVEL: u32 = 21;

/// Resolve the compiler environment for `arch` against an installation root.
pub fn resolve(
    arch: Arch,
    api_level: u32,
    root: &Path,
    host: HostPlatform,
) -> Result<EnvironmentSet> {
    EnvironmentBuilder::new(root, host)?.build(arch, api_level)
}

/// Like [`resolve`], with cgo include and library flags prepended to the
/// values `inherited` already carries.
pub fn resolve_with_flags(
    arch: Arch,
    api_level: u32,
    root: &Path,
    host: HostPlatform,
    inherited: &impl EnvSource,
) -> Result<EnvironmentSet> {
    EnvironmentBuilder::new(root, host)?.build_with_flags(arch, api_level, inherited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_end_to_end_amd64() {
        let host = HostPlatform::new(HostOs::Linux, HostArch::X86_64);
        let sdk = TempDir::new().unwrap();
        let root = sdk.path().join("ndk").join("25.2.9519653");
        let paths = NdkPaths::new(&root, &host).unwrap();

        fs::create_dir_all(paths.bin_dir()).unwrap();
        for name in [
            "x86_64-linux-android21-clang",
            "x86_64-linux-android21-clang++",
            "x86_64-linux-android33-clang",
            "x86_64-linux-android33-clang++",
        ] {
            fs::write(paths.bin_dir().join(name), "").unwrap();
        }
        fs::create_dir_all(paths.library_dir(Arch::X86_64.spec(), DEFAULT_API_LEVEL)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("ANDROID_HOME".to_string(), sdk.path().display().to_string());
        let installation = NdkDetector::new(&vars).locate().unwrap();
        assert_eq!(installation.root, root);

        let arch: Arch = "amd64".parse().unwrap();
        let env = resolve(arch, DEFAULT_API_LEVEL, &installation.root, host).unwrap();

        assert_eq!(env.get("GOOS"), Some("android"));
        assert_eq!(env.get("GOARCH"), Some("amd64"));
        assert_eq!(env.get("CGO_ENABLED"), Some("1"));
        assert!(!env.contains("GOARM"));
        for key in ["CC", "CXX"] {
            let compiler = PathBuf::from(env.get(key).unwrap());
            assert_eq!(compiler.parent(), Some(paths.bin_dir().as_path()));
        }
    }

    #[test]
    fn test_resolve_with_flags() {
        let host = HostPlatform::new(HostOs::Darwin, HostArch::Aarch64);
        let ndk = TempDir::new().unwrap();
        let paths = NdkPaths::new(ndk.path(), &host).unwrap();
        assert_eq!(paths.host_tag(), "darwin-x86_64");

        fs::create_dir_all(paths.bin_dir()).unwrap();
        for name in ["aarch64-linux-android21-clang", "aarch64-linux-android21-clang++"] {
            fs::write(paths.bin_dir().join(name), "").unwrap();
        }
        fs::create_dir_all(paths.library_dir(Arch::Arm64.spec(), 26)).unwrap();

        let inherited: HashMap<String, String> = HashMap::new();
        let env = resolve_with_flags(Arch::Arm64, 26, ndk.path(), host, &inherited).unwrap();
        assert!(env.get("CGO_LDFLAGS").unwrap().ends_with("aarch64-linux-android/26"));
        assert!(env.get("CGO_CFLAGS").unwrap().starts_with("-I"));
    }
}
