//! Access-token providers
//!
//! driveup does not run OAuth flows itself; it consumes an already
//! authorized session through the [`AccessTokenProvider`] port. The
//! providers here cover the common deployment shapes: a token passed on
//! the command line, a token file maintained by an external refresher
//! (re-read on every call so rotation needs no restart), and an
//! environment variable.

use std::path::PathBuf;

use anyhow::Context;
use driveup_core::ports::remote_store::AccessTokenProvider;

/// Environment variable consulted by [`EnvTokenProvider`]
pub const TOKEN_ENV_VAR: &str = "GOOGLE_DRIVE_TOKEN";

// ============================================================================
// StaticTokenProvider
// ============================================================================

/// Serves a fixed token for the lifetime of the process
///
/// Suitable for one-shot runs and tests; daemon deployments should prefer
/// [`TokenFileProvider`] so an external refresher can rotate the token.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wraps a token obtained out of band
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait::async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> anyhow::Result<String> {
        Ok(self.token.clone())
    }
}

// ============================================================================
// TokenFileProvider
// ============================================================================

/// Reads the access token from a file on every call
///
/// The file holds the bare token, optionally followed by a trailing
/// newline. Re-reading per call means an external refresh job can swap
/// the file without the daemon noticing anything but a new token.
pub struct TokenFileProvider {
    path: PathBuf,
}

impl TokenFileProvider {
    /// Creates a provider backed by the given token file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl AccessTokenProvider for TokenFileProvider {
    async fn access_token(&self) -> anyhow::Result<String> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read token file {}", self.path.display()))?;
        let token = raw.trim();
        if token.is_empty() {
            anyhow::bail!("token file {} is empty", self.path.display());
        }
        Ok(token.to_string())
    }
}

// ============================================================================
// EnvTokenProvider
// ============================================================================

/// Reads the access token from the `GOOGLE_DRIVE_TOKEN` environment variable
pub struct EnvTokenProvider;

#[async_trait::async_trait]
impl AccessTokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> anyhow::Result<String> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .with_context(|| format!("{TOKEN_ENV_VAR} is not set"))?;
        if token.is_empty() {
            anyhow::bail!("{TOKEN_ENV_VAR} is empty");
        }
        Ok(token)
    }
}
