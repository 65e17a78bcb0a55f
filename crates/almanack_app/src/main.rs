mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use almanack_engine::{
    ensure_cache_dir, ApiClient, FileStore, HeaderSource, NoCredentials, StaticToken,
};
use almanack_logging::{almanack_info, almanack_warn};
use anyhow::Context;
use clap::Parser;

use crate::commands::Command;
use crate::config::AppConfig;

const TOKEN_ENV: &str = "ALMANACK_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "almanack", version)]
#[command(about = "Read-only console for the Almanack content API")]
struct Cli {
    /// Config file; defaults to ./almanack.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bearer token; falls back to $ALMANACK_TOKEN.
    #[arg(long)]
    token: Option<String>,
    /// Override the configured API origin.
    #[arg(long)]
    base_url: Option<String>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn credentials(token: Option<String>) -> Arc<dyn HeaderSource> {
    let token = token.or_else(|| std::env::var(TOKEN_ENV).ok());
    match token.as_deref().and_then(StaticToken::new) {
        Some(token) => Arc::new(token),
        None => {
            almanack_warn!("no usable token; requests will be refused");
            Arc::new(NoCredentials)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    logging::initialize(config.log_destination, cli.verbose);
    almanack_info!("using API at {}", config.base_url);

    ensure_cache_dir(&config.cache_dir)
        .with_context(|| format!("preparing cache dir {:?}", config.cache_dir))?;
    let store = Arc::new(FileStore::new(config.cache_dir.clone()));

    let client = ApiClient::new(&config.client_settings(), credentials(cli.token))
        .context("building API client")?;

    commands::run(cli.command, &client, store)
        .await
        .map_err(|err| anyhow::anyhow!("{}: {}", err.name(), err))
}
