//! Upload executor
//!
//! Carries out the transfer for candidates the decider marked for
//! upload. When a remote entry with the same name already exists (the
//! decision was `ContentChanged` or `Forced`), the entry is updated in
//! place by ID so repeated uploads never multiply same-name duplicates;
//! otherwise a new file is created in the scope.
//!
//! All failures come back as [`SyncError::Upload`] for the orchestrator
//! to record against the one candidate; nothing here can abort a cycle.

use driveup_core::domain::candidate::{LocalCandidate, RemoteEntry};
use driveup_core::domain::errors::SyncError;
use driveup_core::domain::newtypes::FolderScope;
use driveup_core::ports::remote_store::RemoteStore;
use tracing::debug;

/// Transfers one candidate to the remote store.
///
/// # Arguments
/// * `store` - the remote store port
/// * `candidate` - the file to transfer
/// * `scope` - the target folder
/// * `existing` - the snapshot entry to overwrite, when the decision
///   matched one
pub async fn execute_upload(
    store: &dyn RemoteStore,
    candidate: &LocalCandidate,
    scope: &FolderScope,
    existing: Option<&RemoteEntry>,
) -> Result<RemoteEntry, SyncError> {
    let upload_err = |e: anyhow::Error| SyncError::Upload {
        name: candidate.rel_name.clone(),
        message: format!("{e:#}"),
    };

    match existing {
        Some(entry) => {
            debug!(
                name = %candidate.rel_name,
                id = %entry.id,
                "Updating existing remote entry in place"
            );
            store
                .update_file(&entry.id, &candidate.abs_path)
                .await
                .map_err(upload_err)
        }
        None => {
            debug!(name = %candidate.rel_name, scope = %scope, "Creating remote entry");
            store
                .create_file(&candidate.abs_path, scope, &candidate.rel_name)
                .await
                .map_err(upload_err)
        }
    }
}
