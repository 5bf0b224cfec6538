use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::{cmd_clear, cmd_set, cmd_status};
use config::ProjectConfig;

#[derive(Parser)]
#[command(name = "crawlmark")]
#[command(about = "Inspect and manage crawl checkpoints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to crawlmark.toml config file
    #[arg(short, long, default_value = "crawlmark.toml")]
    config: PathBuf,

    /// JSON checkpoint file to operate on
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// SQLite checkpoint database to operate on
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current checkpoint
    Status,

    /// Write checkpoint fields by hand
    Set {
        /// Page number to store (file backend)
        #[arg(long)]
        page: Option<u64>,

        /// URL to store (file backend)
        #[arg(long)]
        url: Option<String>,

        /// Last processed id to store (db backend)
        #[arg(long)]
        last_id: Option<i64>,
    },

    /// Remove the checkpoint so the job restarts from the beginning
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crawlmark=info".parse().unwrap())
                .add_directive("crawlmark_core=info".parse().unwrap())
                .add_directive("crawlmark_sqlite=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = ProjectConfig::load(&cli.config)?;
    let target = config.resolve_target(cli.file, cli.db)?;

    match cli.command {
        Commands::Status => cmd_status(&target),
        Commands::Set { page, url, last_id } => cmd_set(&target, page, url, last_id),
        Commands::Clear { yes } => cmd_clear(&target, yes),
    }
}
