use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let explicit = config_path.is_some();
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => {
            // Priority: ./config/dirsync.yaml > ~/.config/dirsync/config.yaml
            let local_config = PathBuf::from("config/dirsync.yaml");
            if local_config.exists() {
                local_config
            } else {
                let mut path = dirs::config_dir().context("Failed to get config directory")?;
                path.push("dirsync");
                path.push("config.yaml");
                path
            }
        }
    };

    let mut config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config = Config::from_yaml(&content)?;
        info!("Loaded configuration from: {}", config_path.display());
        config
    } else if explicit {
        anyhow::bail!("Config file not found: {}", config_path.display());
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        Config::default()
    };

    config.apply_env_overrides(|key| env::var(key).ok())?;
    Ok(LoadedConfig {
        config,
        path: config_path,
    })
}
