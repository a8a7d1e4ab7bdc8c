//! Upload operations for the Drive v3 API
//!
//! Both entry points use the resumable upload protocol so file contents
//! are streamed from disk rather than buffered in memory:
//!
//! - [`create_file`] - `POST /files?uploadType=resumable`, then a streamed
//!   `PUT` to the returned session URL
//! - [`update_file`] - `PATCH /files/{id}?uploadType=resumable`, then the
//!   same streamed `PUT`; used for changed/forced uploads so re-uploading
//!   never multiplies same-name duplicates
//!
//! ## Drive API references
//!
//! - [Resumable uploads](https://developers.google.com/drive/api/guides/manage-uploads#resumable)

use std::path::Path;

use anyhow::{Context, Result};
use driveup_core::domain::candidate::RemoteEntry;
use driveup_core::domain::newtypes::{FolderScope, RemoteId};
use reqwest::header::{CONTENT_LENGTH, LOCATION};
use reqwest::{Body, Method};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::client::DriveClient;
use crate::files::{drive_file_to_entry, DriveFile};

/// Metadata fields requested on the final upload response
const UPLOAD_FIELDS: &str = "id,name,md5Checksum,size,modifiedTime";

// ============================================================================
// Session initiation
// ============================================================================

/// Opens a resumable upload session and returns the session URL
///
/// The session URL arrives in the `Location` header of the initiation
/// response and is valid for a limited time.
async fn open_session(
    client: &DriveClient,
    method: Method,
    path: &str,
    metadata: serde_json::Value,
    content_length: u64,
) -> Result<String> {
    let response = client
        .upload_request(method, path)
        .await?
        .query(&[("uploadType", "resumable"), ("fields", UPLOAD_FIELDS)])
        .header("X-Upload-Content-Length", content_length)
        .json(&metadata)
        .send()
        .await
        .context("failed to initiate upload session")?
        .error_for_status()
        .context("upload session initiation returned error status")?;

    let session_url = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .context("upload session response missing Location header")?;

    Ok(session_url)
}

/// Streams the file's bytes to the session URL and parses the resulting
/// file resource
async fn put_content(
    client: &DriveClient,
    session_url: &str,
    local_path: &Path,
    content_length: u64,
) -> Result<RemoteEntry> {
    let file = tokio::fs::File::open(local_path)
        .await
        .with_context(|| format!("failed to open {}", local_path.display()))?;
    let body = Body::wrap_stream(ReaderStream::new(file));

    let item: DriveFile = client
        .request_url(Method::PUT, session_url)
        .await?
        .header(CONTENT_LENGTH, content_length)
        .body(body)
        .send()
        .await
        .context("failed to send upload content")?
        .error_for_status()
        .context("upload content returned error status")?
        .json()
        .await
        .context("failed to parse upload response")?;

    drive_file_to_entry(item)
}

async fn file_len(local_path: &Path) -> Result<u64> {
    let meta = tokio::fs::metadata(local_path)
        .await
        .with_context(|| format!("failed to stat {}", local_path.display()))?;
    Ok(meta.len())
}

// ============================================================================
// create_file
// ============================================================================

/// Uploads a new file into the folder scope
///
/// # Arguments
/// * `client` - the authenticated Drive client
/// * `local_path` - the file to transfer
/// * `scope` - the parent folder
/// * `name` - display name for the new entry
///
/// # Returns
/// Metadata of the created entry, including the MD5 Drive computed
pub async fn create_file(
    client: &DriveClient,
    local_path: &Path,
    scope: &FolderScope,
    name: &str,
) -> Result<RemoteEntry> {
    let len = file_len(local_path).await?;
    debug!(name, bytes = len, scope = %scope, "Creating remote file");

    let mut metadata = serde_json::json!({ "name": name });
    if let FolderScope::Folder(id) = scope {
        metadata["parents"] = serde_json::json!([id.as_str()]);
    }

    let session_url = open_session(client, Method::POST, "/files", metadata, len).await?;
    let entry = put_content(client, &session_url, local_path, len).await?;

    debug!(name, id = %entry.id, "Create upload completed");
    Ok(entry)
}

// ============================================================================
// update_file
// ============================================================================

/// Replaces the content of an existing remote file
///
/// # Arguments
/// * `client` - the authenticated Drive client
/// * `id` - the entry to overwrite
/// * `local_path` - the file to transfer
pub async fn update_file(
    client: &DriveClient,
    id: &RemoteId,
    local_path: &Path,
) -> Result<RemoteEntry> {
    let len = file_len(local_path).await?;
    debug!(id = %id, bytes = len, "Updating remote file content");

    let path = format!("/files/{}", id.as_str());
    let session_url =
        open_session(client, Method::PATCH, &path, serde_json::json!({}), len).await?;
    let entry = put_content(client, &session_url, local_path, len).await?;

    debug!(id = %entry.id, "Update upload completed");
    Ok(entry)
}
