//! driveup CLI - Command-line interface for driveup
//!
//! Provides commands for:
//! - Running a single sync cycle
//! - Running the background scheduling loop in the foreground
//! - Viewing and managing configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config::ConfigCommand, daemon::DaemonCommand, sync::SyncCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "driveup", version, about = "One-way directory uploader for Google Drive")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one sync cycle and exit
    Sync(SyncCommand),
    /// Run the scheduling loop until SIGTERM or SIGINT
    Daemon(DaemonCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = OutputFormat::from_flag(cli.json);

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(cli.config, format).await,
        Commands::Daemon(cmd) => {
            cmd.execute(cli.config, format).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config(cmd) => {
            cmd.execute(cli.config, format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
