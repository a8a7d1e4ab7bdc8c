//! Daemon command - run the scheduling loop in the foreground
//!
//! Provides the `driveup daemon` CLI command which:
//! 1. Loads configuration and verifies credentials once at startup
//! 2. Logs the effective settings as a startup banner
//! 3. Runs the fixed-interval scheduler until SIGTERM or SIGINT
//!
//! Intended to run under a supervisor (systemd service, container
//! entrypoint); it holds no pidfile and forks nothing.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use driveup_core::config::Config;
use driveup_core::ports::remote_store::AccessTokenProvider;
use driveup_drive::client::DriveClient;
use driveup_drive::DriveStore;
use driveup_sync::engine::SyncEngine;
use driveup_sync::scanner::FsSource;
use driveup_sync::scheduler::Scheduler;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::output::{OutputFormat, Printer};

#[derive(Debug, Args)]
pub struct DaemonCommand {
    /// Seconds between scan cycles (overrides configuration)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Access token passed directly (prefer --token-file so rotation works)
    #[arg(long)]
    pub token: Option<String>,

    /// File holding the access token, re-read on every request
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

/// Waits for SIGTERM or SIGINT and trips the cancellation token.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler means we can only stop via the supervisor
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

/// Runs the scheduling loop with the given settings until a shutdown
/// signal arrives. Shared with `driveup sync` for configurations that set
/// `sync.daemon_mode`.
pub(crate) async fn run_loop(
    config: Config,
    provider: Arc<dyn AccessTokenProvider>,
    printer: &Printer,
) -> Result<()> {
    // Startup banner: the effective settings this daemon will run with
    info!(
        upload_dir = %config.sync.upload_dir.display(),
        folder_id = %if config.sync.folder_id.is_empty() { "root" } else { &config.sync.folder_id },
        pattern = %config.sync.pattern,
        check_md5 = config.sync.check_md5,
        force_upload = config.sync.force_upload,
        recursive = config.sync.recursive,
        check_interval = config.sync.check_interval,
        concurrency = config.sync.concurrency,
        "driveup daemon starting"
    );

    let interval = Duration::from_secs(config.sync.check_interval);
    let store = Arc::new(DriveStore::new(DriveClient::new(provider)));
    let source = Arc::new(FsSource::new());
    let engine = Arc::new(SyncEngine::new(store, source, config)?);
    let scheduler = Scheduler::new(engine, interval);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal(shutdown).await;
        });
    }

    printer.detail("Daemon running; press Ctrl+C to stop");
    scheduler.run(shutdown).await;

    info!("driveup daemon shut down gracefully");
    Ok(())
}

impl DaemonCommand {
    /// Execute the daemon command. Blocks until a shutdown signal.
    pub async fn execute(&self, config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
        let printer = Printer::new(format);

        let mut config = super::load_config(config_path.as_deref())?;
        if let Some(secs) = self.interval {
            config.sync.check_interval = secs;
        }

        let provider = super::token_provider(self.token.as_deref(), self.token_file.as_ref());
        super::check_auth(provider.as_ref()).await?;

        run_loop(config, provider, &printer).await
    }
}
