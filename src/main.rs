//! ndkenv command-line entry point

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ndkenv::cli::Cli;
use ndkenv::commands::RunCommand;
use ndkenv::core::{AppConfig, NdkEnvError, APP_NAME, VERSION};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            let known = e.downcast_ref::<NdkEnvError>();
            if known.is_some_and(NdkEnvError::is_usage_error) {
                eprintln!();
                let _ = Cli::command().print_help();
            }
            std::process::exit(known.map_or(1, NdkEnvError::exit_code));
        }
    }
}

/// Log to stderr so the child owns stdout. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ndkenv=debug,ndkenv_core=debug,ndkenv_android_toolchain=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    debug!("{} v{} starting", APP_NAME, VERSION);

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path).await?,
        None => AppConfig::load().await?,
    };

    let command = RunCommand::from_cli(cli, &config)?;
    let code = command
        .execute()
        .await
        .map_err(|e| command.describe_failure(e))?;

    Ok(code)
}
