//! Command implementations for the driveup CLI

pub mod config;
pub mod daemon;
pub mod sync;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use driveup_core::config::Config;
use driveup_core::ports::remote_store::AccessTokenProvider;
use driveup_drive::auth::{EnvTokenProvider, StaticTokenProvider, TokenFileProvider};
use tracing::info;

/// Loads configuration from `path` (or the default location) and applies
/// environment overrides on top.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path);
    config.apply_env_overrides();

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("invalid configuration: {}", messages.join("; "));
    }

    info!(config_path = %config_path.display(), "Loaded configuration");
    Ok(config)
}

/// Picks the access-token provider from the command-line options.
///
/// Precedence: explicit `--token`, then `--token-file`, then the
/// `GOOGLE_DRIVE_TOKEN` environment variable.
pub(crate) fn token_provider(
    token: Option<&str>,
    token_file: Option<&PathBuf>,
) -> Arc<dyn AccessTokenProvider> {
    match (token, token_file) {
        (Some(token), _) => Arc::new(StaticTokenProvider::new(token)),
        (None, Some(path)) => Arc::new(TokenFileProvider::new(path)),
        (None, None) => Arc::new(EnvTokenProvider),
    }
}

/// Verifies credentials are usable before any cycle work starts.
///
/// A missing or empty token is an authentication failure and fatal for
/// the whole invocation, matching the rule that auth problems are never
/// retried per candidate.
pub(crate) async fn check_auth(provider: &dyn AccessTokenProvider) -> Result<()> {
    provider
        .access_token()
        .await
        .context("authentication failed; provide --token, --token-file, or GOOGLE_DRIVE_TOKEN")?;
    Ok(())
}
