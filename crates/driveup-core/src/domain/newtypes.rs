//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the identifiers and values that flow
//! through the decision engine. Each newtype validates at construction
//! time so the rest of the code can assume well-formed values.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SyncError;

// ============================================================================
// Fingerprint
// ============================================================================

/// Content fingerprint: the lowercase hex MD5 digest of a file's bytes.
///
/// Used purely as a dedup key against the `md5Checksum` field Drive
/// reports for uploaded files; never as a security credential. Two files
/// with identical bytes always produce identical fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Creates a fingerprint from a hex digest string.
    ///
    /// The input is lowercased so fingerprints compare case-insensitively
    /// (Drive reports lowercase hex, local hashing may differ).
    ///
    /// # Errors
    /// Returns an error if the string is not a 32-character hex digest.
    pub fn new(hex: impl Into<String>) -> Result<Self, SyncError> {
        let hex = hex.into().to_ascii_lowercase();
        if hex.len() != 32 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SyncError::InvalidValue(format!(
                "not a 32-character hex md5 digest: {hex}"
            )));
        }
        Ok(Self(hex))
    }

    /// Creates a fingerprint from a raw 16-byte MD5 digest.
    pub fn from_bytes(digest: &[u8; 16]) -> Self {
        let mut hex = String::with_capacity(32);
        for byte in digest {
            use std::fmt::Write;
            // write! to a String cannot fail
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// Returns the hex digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// RemoteId
// ============================================================================

/// Provider-assigned identifier of a remote file
///
/// Opaque to the core; Drive item IDs are non-empty URL-safe strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    /// Wraps a provider-assigned ID. Empty IDs are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, SyncError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SyncError::InvalidValue(
                "remote entry with empty id".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// FolderScope
// ============================================================================

/// The remote folder against which matches are evaluated
///
/// `FolderScope::Root` targets the drive root; `FolderScope::Folder(id)`
/// targets a specific folder by its remote ID. Constructed once from
/// configuration and shared read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolderScope {
    /// The drive root
    Root,
    /// A specific folder by remote ID
    Folder(RemoteId),
}

impl FolderScope {
    /// Parses a scope from the configured folder ID string.
    ///
    /// An empty or whitespace-only string means the drive root.
    pub fn from_config(folder_id: &str) -> Result<Self, SyncError> {
        let trimmed = folder_id.trim();
        if trimmed.is_empty() {
            Ok(Self::Root)
        } else {
            Ok(Self::Folder(RemoteId::new(trimmed)?))
        }
    }

    /// Returns the parent folder ID Drive queries expect, `"root"` for
    /// the drive root.
    pub fn parent_id(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Folder(id) => id.as_str(),
        }
    }
}

impl Display for FolderScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Folder(id) => write!(f, "{id}"),
        }
    }
}
