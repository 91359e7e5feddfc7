//! CLI commands for ndkenv
//!
//! Resolves the NDK environment for the requested architecture and runs the
//! wrapped command under it.

use std::path::PathBuf;

use ndkenv_android_toolchain::{
    Arch, EnvSource, EnvironmentBuilder, EnvironmentSet, HostPlatform, Installation, NdkDetector,
    ProcessEnv,
};
use ndkenv_core::{AppConfig, NdkEnvError, Result};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::launcher;

/// Run command options
#[derive(Debug, Clone)]
pub struct RunCommand {
    pub arch: Arch,
    pub api_level: u32,
    pub ndk: Option<PathBuf>,
    pub cgo_flags: bool,
    pub print: bool,
    pub command: Vec<String>,
}

impl RunCommand {
    /// Merge command-line options over the configuration file
    pub fn from_cli(cli: Cli, config: &AppConfig) -> Result<Self> {
        // An exported but empty $GOARCH counts as unset.
        let arch_id = cli
            .arch
            .filter(|arch| !arch.is_empty())
            .or_else(|| config.android.arch.clone())
            .ok_or(NdkEnvError::MissingArchitecture)?;

        Ok(Self {
            arch: arch_id.parse()?,
            api_level: cli.level.unwrap_or(config.android.api_level),
            ndk: cli.ndk.or_else(|| config.android.ndk_path.clone()),
            cgo_flags: config.android.cgo_flags && !cli.no_flags,
            print: cli.print,
            command: cli.command,
        })
    }

    /// Locate the NDK and build the environment for the target architecture
    pub fn environment(
        &self,
        inherited: &impl EnvSource,
        host: HostPlatform,
    ) -> Result<(Installation, EnvironmentSet)> {
        let installation = NdkDetector::new(inherited)
            .with_pinned(self.ndk.clone())
            .locate()?;

        let builder = EnvironmentBuilder::new(&installation.root, host)?;
        let env = if self.cgo_flags {
            builder.build_with_flags(self.arch, self.api_level, inherited)?
        } else {
            builder.build(self.arch, self.api_level)?
        };

        Ok((installation, env))
    }

    /// Execute against the real process environment and host.
    ///
    /// Returns the exit code this process should report.
    pub async fn execute(&self) -> Result<i32> {
        let host = HostPlatform::current()?;
        self.run_with(&ProcessEnv, host).await
    }

    /// Attach the target architecture to resolution and launch failures.
    ///
    /// Usage errors are returned as they are so the help text follows them.
    pub fn describe_failure(&self, err: NdkEnvError) -> anyhow::Error {
        if err.is_usage_error() {
            anyhow::Error::new(err)
        } else {
            anyhow::Error::new(err)
                .context(format!("cannot run in the {} NDK environment", self.arch))
        }
    }

    async fn run_with(&self, inherited: &impl EnvSource, host: HostPlatform) -> Result<i32> {
        let (installation, env) = self.environment(inherited, host)?;

        if self.print {
            print!("{}", env.shell_exports(host.os));
            return Ok(0);
        }

        let Some((program, args)) = self.command.split_first() else {
            eprintln!("Environment: {}", env.assignments().join(", "));
            return Err(NdkEnvError::MissingArguments);
        };

        info!(
            "Running {} for {} (API {}) with NDK at {:?}",
            program, self.arch, self.api_level, installation.root
        );
        let status = launcher::launch(program, args, &env).await?;
        if !status.success() {
            warn!("{} exited with {}", program, status);
        }

        Ok(launcher::exit_code(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndkenv_android_toolchain::{HostArch, HostOs, NdkPaths, ToolchainError};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    const LINUX: HostPlatform = HostPlatform {
        os: HostOs::Linux,
        arch: HostArch::X86_64,
    };

    fn cli(arch: Option<&str>, command: &[&str]) -> Cli {
        Cli {
            level: None,
            arch: arch.map(str::to_string),
            ndk: None,
            config: None,
            no_flags: false,
            print: false,
            verbose: false,
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fake_ndk(api_level: u32) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let paths = NdkPaths::new(tmp.path(), &LINUX).unwrap();
        fs::create_dir_all(paths.bin_dir()).unwrap();
        for arch in Arch::all() {
            let spec = arch.spec();
            for tool in ["clang", "clang++"] {
                let name = format!("{}{}-{}", spec.clang_prefix, spec.min_api, tool);
                fs::write(paths.bin_dir().join(name), "").unwrap();
            }
            fs::create_dir_all(paths.library_dir(spec, api_level)).unwrap();
        }
        tmp
    }

    fn ndk_env(root: &TempDir) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(
            "ANDROID_NDK_HOME".to_string(),
            root.path().display().to_string(),
        );
        vars.insert("CGO_LDFLAGS".to_string(), "-lm".to_string());
        vars
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.android.arch = Some("arm".to_string());
        config.android.api_level = 24;

        let mut args = cli(Some("arm64"), &["go", "build"]);
        args.level = Some(26);
        let run = RunCommand::from_cli(args, &config).unwrap();
        assert_eq!(run.arch, Arch::Arm64);
        assert_eq!(run.api_level, 26);

        let run = RunCommand::from_cli(cli(None, &[]), &config).unwrap();
        assert_eq!(run.arch, Arch::Arm);
        assert_eq!(run.api_level, 24);
        assert!(run.cgo_flags);
    }

    #[test]
    fn test_missing_and_unknown_arch() {
        let config = AppConfig::default();
        let err = RunCommand::from_cli(cli(None, &["go"]), &config).unwrap_err();
        assert!(matches!(err, NdkEnvError::MissingArchitecture));

        let err = RunCommand::from_cli(cli(Some(""), &["go"]), &config).unwrap_err();
        assert!(matches!(err, NdkEnvError::MissingArchitecture));

        let err = RunCommand::from_cli(cli(Some("sparc"), &["go"]), &config).unwrap_err();
        assert!(matches!(
            err,
            NdkEnvError::Toolchain(ToolchainError::UnsupportedArchitecture(_))
        ));
    }

    #[test]
    fn test_empty_arch_falls_back_to_config() {
        let mut config = AppConfig::default();
        config.android.arch = Some("arm64".to_string());

        let run = RunCommand::from_cli(cli(Some(""), &["go"]), &config).unwrap();
        assert_eq!(run.arch, Arch::Arm64);
    }

    #[test]
    fn test_environment_with_flags() {
        let ndk = fake_ndk(21);
        let run = RunCommand::from_cli(cli(Some("arm"), &[]), &AppConfig::default()).unwrap();

        let (installation, env) = run.environment(&ndk_env(&ndk), LINUX).unwrap();
        assert_eq!(installation.root, ndk.path());
        assert_eq!(env.get("GOARM"), Some("7"));
        assert!(env.get("CGO_LDFLAGS").unwrap().ends_with("arm-linux-androideabi/21 -lm"));
    }

    #[test]
    fn test_environment_without_flags() {
        let ndk = fake_ndk(21);
        let mut args = cli(Some("386"), &[]);
        args.no_flags = true;
        let run = RunCommand::from_cli(args, &AppConfig::default()).unwrap();

        let (_, env) = run.environment(&ndk_env(&ndk), LINUX).unwrap();
        assert!(!env.contains("CGO_CFLAGS"));
        assert!(!env.contains("CGO_LDFLAGS"));
    }

    #[tokio::test]
    async fn test_missing_command() {
        let ndk = fake_ndk(21);
        let run = RunCommand::from_cli(cli(Some("amd64"), &[]), &AppConfig::default()).unwrap();
        let err = run.run_with(&ndk_env(&ndk), LINUX).await.unwrap_err();
        assert!(matches!(err, NdkEnvError::MissingArguments));
    }

    #[tokio::test]
    async fn test_resolution_failure_before_launch() {
        let run = RunCommand::from_cli(cli(Some("amd64"), &["true"]), &AppConfig::default()).unwrap();
        let err = run.run_with(&HashMap::new(), LINUX).await.unwrap_err();
        assert!(matches!(
            err,
            NdkEnvError::Toolchain(ToolchainError::InstallationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_failure_context() {
        let ndk = fake_ndk(21);
        let run = RunCommand::from_cli(cli(Some("amd64"), &[]), &AppConfig::default()).unwrap();
        let err = run.run_with(&ndk_env(&ndk), LINUX).await.unwrap_err();
        let described = run.describe_failure(err);
        assert_eq!(format!("{:#}", described), "missing arguments: no command to run");
        assert!(described
            .downcast_ref::<NdkEnvError>()
            .is_some_and(NdkEnvError::is_usage_error));

        let run = RunCommand::from_cli(cli(Some("amd64"), &["true"]), &AppConfig::default()).unwrap();
        let err = run.run_with(&HashMap::new(), LINUX).await.unwrap_err();
        let described = run.describe_failure(err);
        assert!(format!("{:#}", described).starts_with("cannot run in the amd64 NDK environment: "));
        assert!(matches!(
            described.downcast_ref::<NdkEnvError>(),
            Some(NdkEnvError::Toolchain(ToolchainError::InstallationNotFound { .. }))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_runs_with_overrides() {
        let ndk = fake_ndk(21);
        let script = r#"test "$GOOS" = android && test "$GOARCH" = arm64 && test "$CGO_ENABLED" = 1"#;
        let run = RunCommand::from_cli(
            cli(Some("arm64"), &["sh", "-c", script]),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(run.run_with(&ndk_env(&ndk), LINUX).await.unwrap(), 0);

        let run = RunCommand::from_cli(cli(Some("arm64"), &["sh", "-c", "exit 7"]), &AppConfig::default())
            .unwrap();
        assert_eq!(run.run_with(&ndk_env(&ndk), LINUX).await.unwrap(), 7);
    }
}
