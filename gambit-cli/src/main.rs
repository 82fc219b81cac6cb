//! GAMBIT CLI - Command-line interface
//!
//! Commands:
//! - play: Play arena games with a search or reflex runner
//! - nodes: Compare search effort across policies and depths

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gambit_core::SearchConfig;

mod nodes_cmd;
mod play_cmd;

#[derive(Parser)]
#[command(name = "gambit")]
#[command(about = "GAMBIT multi-agent adversarial search")]
#[command(version)]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Search configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play arena games
    Play(play_cmd::PlayArgs),
    /// Count nodes searched per policy and depth
    Nodes(nodes_cmd::NodesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let search = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed, search),
        Commands::Nodes(args) => nodes_cmd::run(args, search),
    }
}
