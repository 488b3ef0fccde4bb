mod commands;

use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};

use tracing_subscriber::{prelude::*, EnvFilter};
use videojuegos_core::config::{self, AppConfig};

use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "videojuegos")]
#[command(version, about = "Classify and catalogue video games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    if let Some(note) = commands::storage_note(&config, &cli.command) {
        tracing::warn!("{note}");
    }
    let service = commands::build_service(&config);
    let stdout = std::io::stdout();
    commands::execute(&service, cli.command, &mut stdout.lock())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("videojuegos.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
