//! Local file source port (driven/secondary port)
//!
//! Enumeration of upload candidates. The filesystem implementation lives
//! in `driveup-sync`; tests substitute in-memory doubles.

use std::path::Path;

use crate::domain::candidate::LocalCandidate;
use crate::domain::errors::SyncError;

/// Port trait for local candidate enumeration
///
/// Enumeration is finite and restartable: the engine calls it once per
/// cycle and never caches results across cycles.
#[async_trait::async_trait]
pub trait LocalSource: Send + Sync {
    /// Enumerates files under `dir` whose names match `pattern`
    ///
    /// # Arguments
    /// * `dir` - the upload directory
    /// * `pattern` - glob filter applied to file names (`*` matches all)
    /// * `recursive` - descend into subdirectories
    ///
    /// # Errors
    /// Returns [`SyncError::Enumeration`] if the directory itself cannot
    /// be read; this is fatal to the cycle. Unreadable individual files
    /// surface later, at the fingerprint stage.
    async fn enumerate(
        &self,
        dir: &Path,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<LocalCandidate>, SyncError>;
}
