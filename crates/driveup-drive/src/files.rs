//! Folder listing for the Drive v3 API
//!
//! Wraps `GET /files` (files.list) scoped to one parent folder, excluding
//! trashed entries, and maps the response DTOs into the port-level
//! [`RemoteEntry`]. The caller (the index resolver) owns the
//! page-until-exhaustion loop; this module fetches exactly one page.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use driveup_core::domain::candidate::RemoteEntry;
use driveup_core::domain::newtypes::{Fingerprint, FolderScope, RemoteId};
use driveup_core::ports::remote_store::ListPage;
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::DriveClient;

/// Entries requested per page. Drive allows up to 1000; 100 keeps
/// individual responses small without inflating round-trips much.
const PAGE_SIZE: u32 = 100;

/// Metadata fields fetched for comparison
const LIST_FIELDS: &str = "nextPageToken,files(id,name,md5Checksum,size,modifiedTime)";

// ============================================================================
// Drive API response DTOs
// ============================================================================

/// Response from `GET /files`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    /// Token for the next page (absent on the last page)
    next_page_token: Option<String>,
    /// Files on this page
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// A single file resource in a listing or upload response
///
/// Fields use `Option` because Drive omits them for some item kinds:
/// Docs-native files have no `md5Checksum` or `size`, and `size` arrives
/// as a decimal string (int64 in JSON).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriveFile {
    /// Drive item ID
    pub id: String,
    /// Display name
    pub name: String,
    /// MD5 of the content, when Drive stores the bytes verbatim
    pub md5_checksum: Option<String>,
    /// Size in bytes as a decimal string
    pub size: Option<String>,
    /// Last modification time, RFC 3339
    pub modified_time: Option<String>,
}

// ============================================================================
// DriveFile -> RemoteEntry conversion
// ============================================================================

/// Maps a Drive file resource into the port-level [`RemoteEntry`]
///
/// A malformed `md5Checksum` is dropped with a warning rather than
/// failing the listing; the decider then treats the entry as unverifiable.
pub(crate) fn drive_file_to_entry(file: DriveFile) -> Result<RemoteEntry> {
    let md5 = match file.md5_checksum {
        Some(hex) => match Fingerprint::new(&hex) {
            Ok(fp) => Some(fp),
            Err(_) => {
                warn!(id = %file.id, md5 = %hex, "Ignoring malformed md5Checksum");
                None
            }
        },
        None => None,
    };

    let size = file.size.as_deref().and_then(|s| s.parse::<u64>().ok());

    let modified = file
        .modified_time
        .as_deref()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());

    Ok(RemoteEntry {
        name: file.name,
        id: RemoteId::new(file.id).context("listing returned an entry without an id")?,
        md5,
        size,
        modified,
    })
}

// ============================================================================
// list_page
// ============================================================================

/// Fetches one page of the folder scope's listing
///
/// # Arguments
/// * `client` - the authenticated Drive client
/// * `scope` - the folder to list
/// * `page_token` - continuation token from the previous page, if any
///
/// # Errors
/// Returns an error on request failure, non-success status, or an
/// unparsable response body.
pub async fn list_page(
    client: &DriveClient,
    scope: &FolderScope,
    page_token: Option<&str>,
) -> Result<ListPage> {
    let query = format!("'{}' in parents and trashed = false", scope.parent_id());
    debug!(scope = %scope, page_token = ?page_token, "Listing folder page");

    let mut request = client.request(Method::GET, "/files").await?.query(&[
        ("q", query.as_str()),
        ("fields", LIST_FIELDS),
        ("pageSize", &PAGE_SIZE.to_string()),
        ("spaces", "drive"),
    ]);
    if let Some(token) = page_token {
        request = request.query(&[("pageToken", token)]);
    }

    let response: FileListResponse = request
        .send()
        .await
        .context("failed to send files.list request")?
        .error_for_status()
        .context("files.list returned error status")?
        .json()
        .await
        .context("failed to parse files.list response")?;

    let entries = response
        .files
        .into_iter()
        .map(drive_file_to_entry)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        count = entries.len(),
        has_next = response.next_page_token.is_some(),
        "Fetched listing page"
    );

    Ok(ListPage {
        entries,
        next_page_token: response.next_page_token,
    })
}
