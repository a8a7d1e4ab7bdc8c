//! Sync error taxonomy
//!
//! Errors are classified by blast radius:
//!
//! - **Fatal**: [`SyncError::Auth`] - no authorized client, nothing can proceed.
//! - **Cycle-fatal**: [`SyncError::IndexUnavailable`] and
//!   [`SyncError::Enumeration`] - abort the current cycle; the scheduler
//!   logs and retries on the next tick.
//! - **Per-candidate**: [`SyncError::Read`] and [`SyncError::Upload`] -
//!   recorded against one candidate; the cycle continues.
//! - **Validation**: [`SyncError::InvalidValue`] - a malformed domain
//!   value; surfaces in whatever context produced it (config parsing,
//!   response mapping) rather than carrying its own blast radius.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during synchronization
#[derive(Debug, Error)]
pub enum SyncError {
    /// No authorized remote client is available
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The remote index could not be resolved after retries
    #[error("Remote index unavailable: {0}")]
    IndexUnavailable(String),

    /// The local upload directory could not be enumerated
    #[error("Cannot enumerate {dir}: {message}")]
    Enumeration {
        /// The directory that failed to enumerate
        dir: PathBuf,
        /// Underlying cause
        message: String,
    },

    /// A candidate file became unreadable between enumeration and hashing
    #[error("Cannot read {path}: {source}")]
    Read {
        /// The file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A transfer failed for one candidate
    #[error("Upload of {name} failed: {message}")]
    Upload {
        /// The candidate's relative name
        name: String,
        /// Underlying cause
        message: String,
    },

    /// A value failed domain validation (malformed digest, empty ID)
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl SyncError {
    /// Returns true if this error aborts the whole cycle rather than
    /// a single candidate.
    pub fn is_cycle_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Auth(_) | SyncError::IndexUnavailable(_) | SyncError::Enumeration { .. }
        )
    }
}
