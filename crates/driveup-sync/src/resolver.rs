//! Remote index resolver
//!
//! Builds the per-cycle snapshot of the remote folder scope: a read-only
//! mapping from display name to [`RemoteEntry`]. Resolving once per cycle
//! (not per file) avoids one remote round-trip per local candidate and
//! keeps every decision in the cycle consistent with the same snapshot.
//!
//! Page fetches are retried with bounded exponential backoff and full
//! jitter; once retries are exhausted the whole cycle fails with
//! [`SyncError::IndexUnavailable`] so no uploads run against an unknown
//! index state.

use std::collections::HashMap;

use driveup_core::config::RetryConfig;
use driveup_core::domain::candidate::RemoteEntry;
use driveup_core::domain::errors::SyncError;
use driveup_core::domain::newtypes::FolderScope;
use driveup_core::ports::remote_store::{ListPage, RemoteStore};
use tracing::{debug, warn};

use crate::backoff;

// ============================================================================
// RemoteIndex
// ============================================================================

/// Read-only per-cycle snapshot of the remote folder scope
///
/// The remote store does not enforce name uniqueness. When several
/// entries share a name, the index keeps the most-recently-modified one
/// (ties and unknown timestamps keep the first returned), so matching is
/// deterministic rather than listing-order-dependent.
#[derive(Debug, Default)]
pub struct RemoteIndex {
    entries: HashMap<String, RemoteEntry>,
}

impl RemoteIndex {
    /// Returns the entry matching `name`, if any
    pub fn get(&self, name: &str) -> Option<&RemoteEntry> {
        self.entries.get(name)
    }

    /// Number of distinct names in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the scope held no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: RemoteEntry) {
        match self.entries.get(&entry.name) {
            None => {
                self.entries.insert(entry.name.clone(), entry);
            }
            Some(existing) => {
                let newer = match (entry.modified, existing.modified) {
                    (Some(candidate), Some(held)) => candidate > held,
                    (Some(_), None) => true,
                    _ => false,
                };
                if newer {
                    debug!(
                        name = %entry.name,
                        kept = %entry.id,
                        displaced = %existing.id,
                        "Duplicate remote name; keeping most recently modified"
                    );
                    self.entries.insert(entry.name.clone(), entry);
                }
            }
        }
    }
}

// ============================================================================
// resolve_index
// ============================================================================

/// Fetches one page, retrying transient failures with backoff.
async fn fetch_page_with_retry(
    store: &dyn RemoteStore,
    scope: &FolderScope,
    page_token: Option<&str>,
    retry: &RetryConfig,
) -> Result<ListPage, SyncError> {
    let mut last_error = String::new();

    for attempt in 0..retry.max_attempts {
        match store.list_page(scope, page_token).await {
            Ok(page) => return Ok(page),
            Err(e) => {
                last_error = format!("{e:#}");
                if attempt + 1 < retry.max_attempts {
                    let wait = backoff::delay(attempt, retry);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = retry.max_attempts,
                        wait_ms = wait.as_millis() as u64,
                        error = %last_error,
                        "Listing page failed; backing off"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    Err(SyncError::IndexUnavailable(format!(
        "listing failed after {} attempts: {last_error}",
        retry.max_attempts
    )))
}

/// Resolves the full remote index for the folder scope.
///
/// Pages through the listing until exhaustion. Any page failing past its
/// retry budget aborts the resolution; a partial index is never returned.
pub async fn resolve_index(
    store: &dyn RemoteStore,
    scope: &FolderScope,
    retry: &RetryConfig,
) -> Result<RemoteIndex, SyncError> {
    let mut index = RemoteIndex::default();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page_with_retry(store, scope, page_token.as_deref(), retry).await?;
        pages += 1;
        for entry in page.entries {
            index.insert(entry);
        }
        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    debug!(scope = %scope, names = index.len(), pages, "Resolved remote index");
    Ok(index)
}
