//! Soundboard entry point

use anyhow::Context;
use clap::Parser;
use soundboard::cli::{Cli, Commands};
use soundboard::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_env("SOUNDBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(&base_dir),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Some(Commands::Serve(args)) => soundboard::cli::serve::run(args, config, base_dir).await?,
        Some(Commands::List(args)) => soundboard::cli::list::run(args, config, &base_dir)?,
        Some(Commands::Render(args)) => soundboard::cli::render::run(args, config, &base_dir)?,
        None => soundboard::cli::serve::run(Default::default(), config, base_dir).await?,
    }

    Ok(())
}
