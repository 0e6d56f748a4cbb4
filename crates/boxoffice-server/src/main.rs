//! Boxoffice Server Binary
//!
//! Serves the movie revenue prediction form.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use boxoffice_core::BoxofficeConfig;
use boxoffice_server::{serve, AppState, ServerError};

#[derive(Debug, Parser)]
#[command(name = "boxoffice-server", version, about = "Movie revenue prediction form")]
struct Cli {
    /// TOML (or .json) config file
    #[arg(long, env = "BOXOFFICE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file and BOXOFFICE_ADDR
    #[arg(long)]
    addr: Option<String>,

    /// Model artifact path, overrides the config file and BOXOFFICE_MODEL
    #[arg(long)]
    model: Option<String>,
}

fn load_config(cli: &Cli) -> Result<BoxofficeConfig, ServerError> {
    let mut config = match &cli.config {
        Some(path) => BoxofficeConfig::load_file(path)?,
        None => BoxofficeConfig::default(),
    };
    config.apply_env();
    config.apply_overrides(cli.addr.clone(), cli.model.clone());
    config
        .validate()
        .map_err(|e| ServerError::Config(e.into()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(?config, "Resolved configuration");

    let addr = config.server.addr.clone();
    let state = Arc::new(AppState::from_config(config));

    serve(&addr, state).await
}
