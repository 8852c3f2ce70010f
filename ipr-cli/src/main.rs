//! `ipr`: patent portfolio tracker for the KLE IPR cell

mod cli;
mod config;
mod excel;
mod patents;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = Config::load()?;
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }
    log::debug!("Using database {}", config.database_path.display());

    cli::run(cli, config).await
}
