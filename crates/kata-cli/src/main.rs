mod api;
mod cmd;
mod handlers;
mod prompt;
mod render;
mod system;
mod theme;

use clap::{Parser, Subcommand};
use kata_core::store::Store;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "devkata",
    about = "Daily coding kata routines, sessions, and streaks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory (default: ~/.config/devKata)
    #[arg(long, global = true, env = "DEVKATA_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace a kata routine
    New,
    /// Run a kata session
    Start,
    /// Link repositories and configure the coding sandbox
    Config,
    /// Show practice statistics and the activity calendar
    Stats {
        /// Delete all statistics (asks for confirmation)
        #[arg(long)]
        reset: bool,
        /// Restore statistics from a backup
        #[arg(long, conflicts_with = "reset")]
        restore: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let result = Store::resolve(cli.home)
        .map_err(anyhow::Error::from)
        .and_then(|store| match cli.command {
            Commands::New => cmd::new::run(&store),
            Commands::Start => cmd::start::run(&store),
            Commands::Config => cmd::config::run(&store),
            Commands::Stats { reset, restore } => cmd::stats::run(&store, reset, restore),
        });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        exit(1);
    }
}
