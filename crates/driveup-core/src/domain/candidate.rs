//! Per-cycle entities: local candidates, remote entries, and summaries
//!
//! Everything in this module is ephemeral. Candidates are re-enumerated
//! every cycle, the remote index snapshot is rebuilt every cycle, and the
//! summary is consumed by the scheduler for logging. Nothing is persisted
//! across process restarts; each cycle is self-contained and idempotent.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{Fingerprint, RemoteId};

// ============================================================================
// LocalCandidate
// ============================================================================

/// A local file considered for upload in the current cycle
///
/// Produced by directory enumeration filtered by the configured glob
/// pattern. `rel_name` is the path relative to the upload directory with
/// `/` separators; it doubles as the display name on the remote side so
/// nested files stay distinguishable within one folder scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCandidate {
    /// Relative-path-derived name, e.g. `reports/2026/q1.pdf`
    pub rel_name: String,
    /// Absolute path on the local filesystem
    pub abs_path: PathBuf,
    /// Size in bytes at enumeration time
    pub size: u64,
    /// Modification time at enumeration time, if the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}

// ============================================================================
// RemoteEntry
// ============================================================================

/// A file already present in the remote folder scope
///
/// Part of the read-only per-cycle index snapshot. The snapshot may be
/// stale by the time an upload runs; the engine accepts eventual
/// consistency, not strict linearizability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Display name within the folder scope
    pub name: String,
    /// Provider-assigned identifier
    pub id: RemoteId,
    /// Content hash, when the provider reports one (absent for Google
    /// Docs-native formats)
    pub md5: Option<Fingerprint>,
    /// Size in bytes, when reported
    pub size: Option<u64>,
    /// Remote modification time, when reported
    pub modified: Option<DateTime<Utc>>,
}

// ============================================================================
// UploadDecision
// ============================================================================

/// What to do with a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadAction {
    /// Leave the remote store untouched
    Skip,
    /// Transfer the candidate
    Upload,
}

/// Why the decider chose the action it chose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// A remote copy with matching name (and hash, if verified) exists
    AlreadyIdentical,
    /// No remote entry with this name exists
    NotFound,
    /// A remote entry exists but its content hash differs
    ContentChanged,
    /// Force-upload is enabled; match state is irrelevant
    Forced,
}

/// The decider's verdict for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDecision {
    /// Skip or upload
    pub action: UploadAction,
    /// Classification of why
    pub reason: DecisionReason,
}

impl UploadDecision {
    /// Returns true if the candidate should be transferred
    pub fn should_upload(&self) -> bool {
        self.action == UploadAction::Upload
    }
}

// ============================================================================
// CycleSummary
// ============================================================================

/// One failed candidate within a cycle
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFailure {
    /// Relative name of the candidate that failed
    pub rel_name: String,
    /// Human-readable error description
    pub error: String,
}

/// Outcome of one complete scan cycle
///
/// Aggregated by the orchestrator and consumed by the scheduler for
/// logging. Aggregation is commutative over candidate outcomes, so the
/// worker pool may complete candidates in any order.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    /// When the cycle began
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the cycle in milliseconds
    pub duration_ms: u64,
    /// Number of candidates enumerated
    pub total: usize,
    /// Candidates uploaded (created or updated remotely)
    pub uploaded: usize,
    /// Candidates skipped as already identical
    pub skipped: usize,
    /// Candidates that failed at the fingerprint or upload stage
    pub failed: usize,
    /// Itemized failures for diagnosis
    pub errors: Vec<CandidateFailure>,
}

impl CycleSummary {
    /// Returns true if every candidate was either uploaded or skipped
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
