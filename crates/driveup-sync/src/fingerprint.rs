//! Content fingerprinter
//!
//! Computes the MD5 digest of a file's bytes through a fixed-size buffer,
//! so arbitrarily large files never get loaded into memory whole. MD5 is
//! the hash Drive reports as `md5Checksum`; it serves purely as a dedup
//! key, never as a security credential.

use std::path::Path;

use driveup_core::domain::errors::SyncError;
use driveup_core::domain::newtypes::Fingerprint;
use md5::{Digest, Md5};
use tokio::io::AsyncReadExt;

/// Read buffer size: 64 KiB
const BUF_SIZE: usize = 64 * 1024;

/// Computes the content fingerprint of the file at `path`.
///
/// Deterministic: identical bytes always produce identical fingerprints.
///
/// # Errors
/// Returns [`SyncError::Read`] if the file cannot be opened or read,
/// e.g. when it was deleted between enumeration and hashing. This is a
/// per-candidate failure, never fatal to the cycle.
pub async fn fingerprint(path: &Path) -> Result<Fingerprint, SyncError> {
    let read_err = |source: std::io::Error| SyncError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::open(path).await.map_err(read_err)?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BUF_SIZE];

    loop {
        let n = file.read(&mut buf).await.map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest: [u8; 16] = hasher.finalize().into();
    Ok(Fingerprint::from_bytes(&digest))
}
