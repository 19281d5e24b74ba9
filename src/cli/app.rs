use std::process::ExitCode;

use anyhow::Result;
use clap::CommandFactory;
use tracing::{debug, error, info};

use super::context::CliContext;
use super::dispatch::dispatch;
use super::env::CliArgs;
use super::output::render_report;
use super::runtime::{init_logging, load_config, LoadedConfig};

pub async fn run() -> Result<ExitCode> {
    let cli = CliArgs::parse_normalized();

    init_logging(&cli.log_level, cli.debug)?;

    let Some(mode) = cli.mode() else {
        error!("Invalid arguments. Use -u for upload or -d for download.");
        eprintln!("{}", CliArgs::command().render_help());
        return Ok(ExitCode::FAILURE);
    };

    info!("Starting dirsync v{}", env!("CARGO_PKG_VERSION"));

    let LoadedConfig { mut config, path } = load_config(cli.config.as_ref()).await?;
    if let Some(url) = cli.store_url.clone() {
        config.store.url = url;
    }
    let cli_context = CliContext::new(config, path);
    debug!(
        config = %cli_context.config_path().display(),
        store = %cli_context.config().store.url,
        scan_count = cli_context.config().store.scan_count,
        "resolved configuration"
    );

    match dispatch(&mode, &cli_context).await {
        Ok(report) => {
            println!("{}", render_report(&report, cli.output)?);
            info!("Command completed successfully");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
