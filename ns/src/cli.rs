//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// notestore - in-memory notes service
#[derive(Parser, Debug)]
#[command(
    name = "ns",
    author,
    version,
    about = "In-memory notes store served over a JSON API",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the notes API over HTTP
    Serve {
        /// Listen address (overrides server.addr)
        #[arg(short, long)]
        addr: Option<String>,

        /// Seed file (overrides store.seed-path)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Print the seed collection the store would start with, as JSON
    Seed {
        /// Seed file (overrides store.seed-path)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}
