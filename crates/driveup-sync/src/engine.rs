//! Cycle orchestrator
//!
//! Runs one complete scan cycle: enumerate local candidates, resolve the
//! remote index snapshot once, then fingerprint / decide / upload each
//! candidate through a bounded worker pool. Candidate failures are
//! recorded and never abort the cycle; only enumeration and index
//! resolution are cycle-fatal.
//!
//! Cancellation is observed at candidate boundaries: once the token
//! trips, no further candidates are dispatched, but in-flight transfers
//! finish so the remote store is never left with a half-dispatched wave
//! mid-shutdown.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use driveup_core::config::Config;
use driveup_core::domain::candidate::{
    CandidateFailure, CycleSummary, DecisionReason, LocalCandidate,
};
use driveup_core::domain::decision::decide;
use driveup_core::domain::errors::SyncError;
use driveup_core::domain::newtypes::{Fingerprint, FolderScope};
use driveup_core::ports::local_source::LocalSource;
use driveup_core::ports::remote_store::RemoteStore;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::executor;
use crate::fingerprint;
use crate::resolver::{self, RemoteIndex};

// ============================================================================
// SyncEngine
// ============================================================================

/// Orchestrates scan cycles against a remote store and a local source
pub struct SyncEngine {
    store: Arc<dyn RemoteStore>,
    source: Arc<dyn LocalSource>,
    config: Config,
    scope: FolderScope,
}

/// Per-candidate outcome folded into the [`CycleSummary`]
enum Outcome {
    Uploaded,
    Skipped,
    Failed(CandidateFailure),
}

impl SyncEngine {
    /// Creates an engine for the configured folder scope.
    ///
    /// # Errors
    /// Fails if the configured folder ID cannot be parsed into a scope.
    pub fn new(
        store: Arc<dyn RemoteStore>,
        source: Arc<dyn LocalSource>,
        config: Config,
    ) -> Result<Self, SyncError> {
        let scope = FolderScope::from_config(&config.sync.folder_id)?;
        Ok(Self {
            store,
            source,
            config,
            scope,
        })
    }

    /// Runs one complete scan cycle.
    ///
    /// # Returns
    /// The aggregated summary, or a cycle-fatal error when enumeration or
    /// index resolution failed. Per-candidate failures are inside the
    /// summary, not the `Err` branch.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> Result<CycleSummary, SyncError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let candidates = self
            .source
            .enumerate(
                &self.config.sync.upload_dir,
                &self.config.sync.pattern,
                self.config.sync.recursive,
            )
            .await?;
        let total = candidates.len();

        let index = Arc::new(
            resolver::resolve_index(self.store.as_ref(), &self.scope, &self.config.retry).await?,
        );
        debug!(candidates = total, remote_names = index.len(), "Cycle state resolved");

        let semaphore = Arc::new(Semaphore::new(self.config.sync.concurrency));
        let mut workers: JoinSet<Outcome> = JoinSet::new();

        for candidate in candidates {
            if cancel.is_cancelled() {
                info!("Cancellation requested; not dispatching further candidates");
                break;
            }

            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore is never closed while the engine holds it
                Err(_) => break,
            };

            let store = Arc::clone(&self.store);
            let index = Arc::clone(&index);
            let scope = self.scope.clone();
            let force = self.config.sync.force_upload;
            let check_md5 = self.config.sync.check_md5;

            workers.spawn(async move {
                let outcome =
                    process_candidate(store.as_ref(), &index, &scope, candidate, force, check_md5)
                        .await;
                drop(permit);
                outcome
            });
        }

        let mut summary = CycleSummary {
            started_at,
            duration_ms: 0,
            total,
            uploaded: 0,
            skipped: 0,
            failed: 0,
            errors: Vec::new(),
        };

        while let Some(joined) = workers.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => Outcome::Failed(CandidateFailure {
                    rel_name: "<unknown>".to_string(),
                    error: format!("worker task failed: {e}"),
                }),
            };
            match outcome {
                Outcome::Uploaded => summary.uploaded += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed(failure) => {
                    summary.failed += 1;
                    summary.errors.push(failure);
                }
            }
        }

        summary.duration_ms = clock.elapsed().as_millis() as u64;
        Ok(summary)
    }
}

// ============================================================================
// Candidate pipeline
// ============================================================================

/// Fingerprint, decide, and (when warranted) upload one candidate.
async fn process_candidate(
    store: &dyn RemoteStore,
    index: &RemoteIndex,
    scope: &FolderScope,
    candidate: LocalCandidate,
    force: bool,
    check_md5: bool,
) -> Outcome {
    let remote = index.get(&candidate.rel_name);

    // Hash only when a comparison will actually use the result
    let local_md5: Option<Fingerprint> = if check_md5 && !force && remote.is_some() {
        match fingerprint::fingerprint(&candidate.abs_path).await {
            Ok(fp) => Some(fp),
            Err(e) => {
                warn!(name = %candidate.rel_name, error = %e, "Fingerprinting failed");
                return Outcome::Failed(CandidateFailure {
                    rel_name: candidate.rel_name,
                    error: e.to_string(),
                });
            }
        }
    } else {
        None
    };

    let decision = decide(local_md5.as_ref(), remote, force, check_md5);
    if !decision.should_upload() {
        debug!(name = %candidate.rel_name, reason = ?decision.reason, "Skipping candidate");
        return Outcome::Skipped;
    }

    // ContentChanged and Forced overwrite the matched entry in place so
    // repeated cycles never pile up same-name duplicates remotely.
    let existing = match decision.reason {
        DecisionReason::ContentChanged | DecisionReason::Forced => remote,
        _ => None,
    };

    match executor::execute_upload(store, &candidate, scope, existing).await {
        Ok(entry) => {
            info!(
                name = %candidate.rel_name,
                id = %entry.id,
                reason = ?decision.reason,
                "Uploaded candidate"
            );
            Outcome::Uploaded
        }
        Err(e) => {
            warn!(name = %candidate.rel_name, error = %e, "Upload failed");
            Outcome::Failed(CandidateFailure {
                rel_name: candidate.rel_name,
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FsSource;
    use crate::testutil::MockStore;
    use driveup_core::config::ConfigBuilder;
    use driveup_core::domain::candidate::RemoteEntry;
    use driveup_core::domain::newtypes::RemoteId;
    use std::path::Path;

    fn touch(dir: &Path, name: &str, content: &[u8]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn engine_for(store: Arc<MockStore>, config: Config) -> SyncEngine {
        SyncEngine::new(store, Arc::new(FsSource::new()), config).unwrap()
    }

    #[tokio::test]
    async fn test_uploads_new_and_skips_identical() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "report.pdf", b"quarterly numbers");
        touch(dir.path(), "notes.txt", b"meeting notes");

        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);
        let cancel = CancellationToken::new();

        // First cycle uploads both
        let summary = engine.run_cycle(&cancel).await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.uploaded, 2);
        assert_eq!(summary.skipped, 0);
        assert!(summary.is_clean());

        // Second cycle sees matching fingerprints and skips everything
        let summary = engine.run_cycle(&cancel).await.unwrap();
        assert_eq!(summary.uploaded, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(store.upload_count(), 2);
    }

    #[tokio::test]
    async fn test_mixed_cycle_uploads_new_and_skips_matching() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "report.pdf", b"quarterly numbers");
        touch(dir.path(), "notes.txt", b"meeting notes");

        // notes.txt already exists remotely with an identical hash;
        // report.pdf has no remote counterpart.
        let store = Arc::new(MockStore::new());
        let notes_md5 = crate::fingerprint::fingerprint(&dir.path().join("notes.txt"))
            .await
            .unwrap();
        store.seed(vec![RemoteEntry {
            name: "notes.txt".to_string(),
            id: RemoteId::new("remote-notes").unwrap(),
            md5: Some(notes_md5),
            size: Some(13),
            modified: Some(Utc::now()),
        }]);

        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);

        let summary = engine.run_cycle(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(store.created_names(), vec!["report.pdf"]);
        assert!(store.updated_names().is_empty());
    }

    #[tokio::test]
    async fn test_changed_content_updates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "doc.txt", b"v1");

        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);
        let cancel = CancellationToken::new();

        engine.run_cycle(&cancel).await.unwrap();
        touch(dir.path(), "doc.txt", b"v2 with new content");
        let summary = engine.run_cycle(&cancel).await.unwrap();

        assert_eq!(summary.uploaded, 1);
        // One create on the first cycle, one in-place update on the second
        assert_eq!(store.created_names(), vec!["doc.txt"]);
        assert_eq!(store.updated_names(), vec!["doc.txt"]);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_candidate() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "good.txt", b"fine");
        touch(dir.path(), "bad.txt", b"doomed");

        let store = Arc::new(MockStore::new());
        store.fail_uploads_of("bad.txt");
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);

        let summary = engine.run_cycle(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.uploaded, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].rel_name, "bad.txt");
        assert_eq!(store.created_names(), vec!["good.txt"]);
    }

    #[tokio::test]
    async fn test_force_uploads_everything() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "same.txt", b"unchanged");

        let store = Arc::new(MockStore::new());
        let baseline = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), baseline);
        let cancel = CancellationToken::new();
        engine.run_cycle(&cancel).await.unwrap();

        let forced = ConfigBuilder::new()
            .upload_dir(dir.path())
            .force_upload(true)
            .build();
        let engine = engine_for(Arc::clone(&store), forced);
        let summary = engine.run_cycle(&cancel).await.unwrap();

        assert_eq!(summary.uploaded, 1);
        assert_eq!(summary.skipped, 0);
        // Forced re-upload of a matched name overwrites, never duplicates
        assert_eq!(store.created_names(), vec!["same.txt"]);
        assert_eq!(store.updated_names(), vec!["same.txt"]);
    }

    #[tokio::test]
    async fn test_check_md5_off_trusts_name_match() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "doc.txt", b"v1");

        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new()
            .upload_dir(dir.path())
            .check_md5(false)
            .build();
        let engine = engine_for(Arc::clone(&store), config);
        let cancel = CancellationToken::new();

        engine.run_cycle(&cancel).await.unwrap();
        touch(dir.path(), "doc.txt", b"v2 different bytes");
        let summary = engine.run_cycle(&cancel).await.unwrap();

        // Name match alone decides when verification is off
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_upload_dir_is_cycle_fatal() {
        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new()
            .upload_dir("/nonexistent-upload-dir")
            .build();
        let engine = engine_for(store, config);

        let err = engine
            .run_cycle(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Enumeration { .. }));
    }

    #[tokio::test]
    async fn test_index_failure_prevents_all_uploads() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "pending.txt", b"data");

        let store = Arc::new(MockStore::new().with_list_failures(usize::MAX));
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);

        let err = engine
            .run_cycle(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::IndexUnavailable(_)));
        assert_eq!(store.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_dispatches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt", b"a");
        touch(dir.path(), "b.txt", b"b");

        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let summary = engine.run_cycle(&cancel).await.unwrap();

        assert_eq!(summary.uploaded, 0);
        assert_eq!(store.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_directory_is_clean_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MockStore::new());
        let config = ConfigBuilder::new().upload_dir(dir.path()).build();
        let engine = engine_for(Arc::clone(&store), config);

        let summary = engine.run_cycle(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.is_clean());
        // The index is still resolved; emptiness is a local property
        assert_eq!(store.list_calls(), 1);
    }
}
