use clap::Parser;
use fastly_cli::cli::commands::{dispatch, Context};
use fastly_cli::cli::errors::print_error_with_json;
use fastly_cli::cli::tracing_init::init_tracing;
use fastly_cli::cli::Cli;
use fastly_cli::config::manager::ConfigManager;
use fastly_cli::constants;
use fastly_cli::error::Error;
use fastly_cli::fs::OsFileSystem;
use fastly_cli::manifest::Manifest;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    init_tracing(cli.verbosity);

    let manager = std::env::var(constants::ENV_CONFIG_DIR).map_or_else(
        |_| match ConfigManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                print_error_with_json(&e, json_errors);
                std::process::exit(1);
            }
        },
        |config_dir| ConfigManager::with_fs(OsFileSystem, PathBuf::from(config_dir)),
    );

    if let Err(e) = run(cli, &manager).await {
        tracing::debug!(error = ?e, "command failed");
        print_error_with_json(&e, json_errors);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, manager: &ConfigManager<OsFileSystem>) -> Result<(), Error> {
    let config = manager.load_global_config()?;
    let cwd = std::env::current_dir()?;
    let manifest = Manifest::read_from(&OsFileSystem, &cwd);

    let ctx = Context::from_cli(&cli, config, manifest);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &ctx, manager, &mut stdout).await
}
