//! Remote store port (driven/secondary port)
//!
//! The decision engine consumes the remote object store through this
//! narrow interface: paginated listing within one folder scope, create,
//! and update-in-place. The primary implementation targets the Google
//! Drive v3 API (`driveup-drive`), but nothing here is Drive-specific.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific; the engine maps them into its own taxonomy.
//! - One `list_page` call returns one provider page; the resolver owns
//!   the drain-until-exhaustion loop so retry policy stays in one place.

use std::path::Path;

use crate::domain::candidate::RemoteEntry;
use crate::domain::newtypes::{FolderScope, RemoteId};

// ============================================================================
// ListPage DTO
// ============================================================================

/// One page of a remote folder listing
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Entries on this page
    pub entries: Vec<RemoteEntry>,
    /// Token for the next page, `None` when the listing is exhausted
    pub next_page_token: Option<String>,
}

// ============================================================================
// RemoteStore trait
// ============================================================================

/// Port trait for remote object store operations
///
/// Implementations perform the provider-specific API calls. Transfers
/// should stream file contents where the underlying transport allows it
/// rather than buffering whole files in memory.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches one page of entries within the folder scope
    ///
    /// # Arguments
    /// * `scope` - the folder to list
    /// * `page_token` - continuation token from a previous page, `None`
    ///   for the first page
    async fn list_page(
        &self,
        scope: &FolderScope,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPage>;

    /// Creates a new remote file from a local path
    ///
    /// # Arguments
    /// * `local_path` - the file to transfer
    /// * `scope` - the parent folder
    /// * `name` - the display name to create
    ///
    /// # Returns
    /// Metadata of the created entry
    async fn create_file(
        &self,
        local_path: &Path,
        scope: &FolderScope,
        name: &str,
    ) -> anyhow::Result<RemoteEntry>;

    /// Replaces the content of an existing remote file
    ///
    /// Used for changed or forced uploads so re-uploading does not
    /// multiply same-name duplicates in the scope.
    ///
    /// # Arguments
    /// * `id` - the entry to overwrite
    /// * `local_path` - the file to transfer
    async fn update_file(&self, id: &RemoteId, local_path: &Path) -> anyhow::Result<RemoteEntry>;
}

// ============================================================================
// AccessTokenProvider trait
// ============================================================================

/// Port trait for the authorized remote client seam
///
/// Supplies a bearer token for an already-authorized session. How the
/// token came to exist (interactive OAuth, a refresh daemon, a secret
/// manager) is outside the core; failure here is fatal because no cycle
/// can proceed without an authorized client.
///
/// Lifecycle: constructed once at process start, reused across cycles,
/// dropped at process exit.
#[async_trait::async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a currently valid access token
    async fn access_token(&self) -> anyhow::Result<String>;
}
