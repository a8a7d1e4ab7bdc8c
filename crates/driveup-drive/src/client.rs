//! Google Drive API client
//!
//! Provides a typed HTTP client for the Drive v3 REST API. Handles bearer
//! authentication (tokens fetched per request from the configured
//! provider, so external rotation is picked up immediately), base URL
//! construction for both the metadata and upload endpoints, and custom
//! base URLs for testing against a mock server.

use std::sync::Arc;

use anyhow::{Context, Result};
use driveup_core::ports::remote_store::AccessTokenProvider;
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

/// Base URL for Drive v3 metadata operations
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Base URL for Drive v3 media upload operations
const DRIVE_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";

/// HTTP client for Google Drive API calls
///
/// Wraps `reqwest::Client` with token-provider-backed authentication and
/// endpoint construction. Cloneable handles share the same connection
/// pool and provider.
#[derive(Clone)]
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for metadata requests
    base_url: String,
    /// Base URL for media upload requests
    upload_base_url: String,
    /// Source of bearer tokens for each request
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl DriveClient {
    /// Creates a new DriveClient against the production endpoints
    ///
    /// # Arguments
    /// * `token_provider` - supplies a valid access token per request
    pub fn new(token_provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: DRIVE_BASE_URL.to_string(),
            upload_base_url: DRIVE_UPLOAD_BASE_URL.to_string(),
            token_provider,
        }
    }

    /// Creates a DriveClient with custom base URLs (useful for testing)
    ///
    /// # Arguments
    /// * `token_provider` - supplies a valid access token per request
    /// * `base_url` - base URL for metadata requests
    /// * `upload_base_url` - base URL for media upload requests
    pub fn with_base_urls(
        token_provider: Arc<dyn AccessTokenProvider>,
        base_url: impl Into<String>,
        upload_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            upload_base_url: upload_base_url.into(),
            token_provider,
        }
    }

    /// Creates an authenticated request builder for a metadata path
    ///
    /// Prepends the metadata base URL and attaches the bearer token.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the base URL (e.g. "/files")
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        self.request_url(method, &url).await
    }

    /// Creates an authenticated request builder for an upload path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the upload base URL
    pub async fn upload_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.upload_base_url, path);
        self.request_url(method, &url).await
    }

    /// Creates an authenticated request builder for an absolute URL
    ///
    /// Used for resumable upload session URLs, which the API returns as
    /// absolute `Location` headers.
    pub async fn request_url(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self
            .token_provider
            .access_token()
            .await
            .context("failed to obtain access token")?;
        debug!(%method, url, "Building Drive API request");
        Ok(self.client.request(method, url).bearer_auth(token))
    }
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("base_url", &self.base_url)
            .field("upload_base_url", &self.upload_base_url)
            .finish()
    }
}
