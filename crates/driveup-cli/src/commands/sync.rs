//! Sync command - run one scan cycle and exit
//!
//! Provides the `driveup sync` CLI command which:
//! 1. Loads configuration and applies flag/environment overrides
//! 2. Verifies credentials up front (auth failures are fatal)
//! 3. Wires the Drive adapter and filesystem scanner into the engine
//! 4. Runs a single cycle and displays the summary

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use driveup_core::config::Config;
use driveup_drive::client::DriveClient;
use driveup_drive::DriveStore;
use driveup_sync::engine::SyncEngine;
use driveup_sync::scanner::FsSource;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::output::{OutputFormat, Printer};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Local directory to scan (overrides configuration)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Target Drive folder ID (overrides configuration; empty means root)
    #[arg(long)]
    pub folder_id: Option<String>,

    /// Glob filter applied to file names (overrides configuration)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Upload every candidate regardless of remote state
    #[arg(long)]
    pub force: bool,

    /// Trust name matches alone; skip MD5 comparison
    #[arg(long)]
    pub no_md5: bool,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Access token passed directly (prefer --token-file for daemons)
    #[arg(long)]
    pub token: Option<String>,

    /// File holding the access token, re-read on every request
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

impl SyncCommand {
    /// Folds command-line flags into the loaded configuration.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.dir {
            config.sync.upload_dir = dir.clone();
        }
        if let Some(id) = &self.folder_id {
            config.sync.folder_id = id.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.sync.pattern = pattern.clone();
        }
        if self.force {
            config.sync.force_upload = true;
        }
        if self.no_md5 {
            config.sync.check_md5 = false;
        }
        if self.no_recursive {
            config.sync.recursive = false;
        }
    }

    /// Execute the sync command.
    pub async fn execute(
        &self,
        config_path: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<ExitCode> {
        let printer = Printer::new(format);

        let mut config = super::load_config(config_path.as_deref())?;
        self.apply_overrides(&mut config);

        let provider = super::token_provider(self.token.as_deref(), self.token_file.as_ref());
        super::check_auth(provider.as_ref()).await?;

        // DAEMON_MODE / sync.daemon_mode turns this invocation into the loop
        if config.sync.daemon_mode {
            info!("daemon_mode is set; entering the scheduling loop");
            super::daemon::run_loop(config, provider, &printer).await?;
            return Ok(ExitCode::SUCCESS);
        }

        let store = Arc::new(DriveStore::new(DriveClient::new(provider)));
        let source = Arc::new(FsSource::new());
        let engine = SyncEngine::new(store, source, config)?;

        // Ctrl+C stops dispatching further candidates mid-cycle
        let cancel = CancellationToken::new();
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received; finishing in-flight uploads");
                    cancel.cancel();
                }
            });
        }

        let summary = engine.run_cycle(&cancel).await?;

        printer.json(&serde_json::to_value(&summary)?);

        let duration_display = if summary.duration_ms >= 1000 {
            format!("{:.1}s", summary.duration_ms as f64 / 1000.0)
        } else {
            format!("{}ms", summary.duration_ms)
        };

        if summary.total == 0 {
            printer.success("Nothing to sync");
        } else if summary.is_clean() {
            printer.success(&format!("Sync completed in {duration_display}"));
        } else {
            printer.warn(&format!(
                "Sync completed in {duration_display} with {} failure{}",
                summary.failed,
                if summary.failed == 1 { "" } else { "s" }
            ));
        }

        if summary.uploaded > 0 {
            printer.detail(&format!("Uploaded: {}", summary.uploaded));
        }
        if summary.skipped > 0 {
            printer.detail(&format!("Skipped:  {}", summary.skipped));
        }
        for failure in &summary.errors {
            printer.detail(&format!("Failed:   {} ({})", failure.rel_name, failure.error));
        }

        // Partial failure is visible in the exit status for scripting
        Ok(if summary.is_clean() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
