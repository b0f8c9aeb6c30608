//! notestore - CLI entry point

use std::fs;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use notestore::api::NotesApi;
use notestore::cli::{Cli, Command};
use notestore::config::{Config, LogConfig};
use notestore::domain::resolve_seed;
use notestore::server;
use notestore::state::{NoteCollection, NoteStore};

fn setup_logging(verbose: bool, log: &LogConfig) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    match &log.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create log directory")?;
            }
            let log_file = fs::File::create(path).context("Failed to create log file")?;
            tracing_subscriber::fmt()
                .with_writer(log_file)
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The log file comes from config, so config is loaded before the subscriber exists
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.verbose, &config.log).context("Failed to setup logging")?;

    match cli.command {
        Command::Serve { addr, seed } => {
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            if seed.is_some() {
                config.store.seed_path = seed;
            }
            cmd_serve(&config).await
        }
        Command::Seed { seed } => {
            if seed.is_some() {
                config.store.seed_path = seed;
            }
            cmd_seed(&config)
        }
    }
}

/// Start the store and serve the API
async fn cmd_serve(config: &Config) -> Result<()> {
    config.validate()?;

    let seed = resolve_seed(config.store.seed_path.as_deref())?;
    let store = NoteStore::initialize(seed, config.store.options()).context("Failed to initialize store")?;
    let api = NotesApi::new(store.clone(), config.server.public_host.clone());

    info!(
        addr = %config.server.addr,
        latency_min_ms = config.store.latency_min_ms,
        latency_max_ms = config.store.latency_max_ms,
        "Starting notestore"
    );
    let result = server::serve(&config.server.addr, api).await;

    // The server has stopped (ctrl-c); let the store actor exit too
    if let Err(e) = store.shutdown().await {
        debug!(error = %e, "Store already stopped");
    }
    result
}

/// Print the effective seed collection with assigned ids
fn cmd_seed(config: &Config) -> Result<()> {
    let seed = resolve_seed(config.store.seed_path.as_deref())?;
    let notes = NoteCollection::from_seed(seed).context("Invalid seed collection")?;
    let json = serde_json::to_string_pretty(&notes.filter(None)).context("Failed to serialize seed")?;
    println!("{}", json);
    Ok(())
}
