//! Local candidate enumeration
//!
//! Walks the upload directory (optionally recursively), filters file
//! names through a glob pattern, and produces [`LocalCandidate`] values
//! whose `rel_name` carries the path relative to the upload root with
//! `/` separators. Enumeration restarts from scratch every cycle;
//! nothing is cached.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use driveup_core::domain::candidate::LocalCandidate;
use driveup_core::domain::errors::SyncError;
use driveup_core::ports::local_source::LocalSource;
use glob::Pattern;
use tracing::{debug, warn};

/// Filesystem implementation of the [`LocalSource`] port
#[derive(Debug, Default)]
pub struct FsSource;

impl FsSource {
    /// Creates a new filesystem source
    pub fn new() -> Self {
        Self
    }
}

fn enumeration_error(dir: &Path, message: impl std::fmt::Display) -> SyncError {
    SyncError::Enumeration {
        dir: dir.to_path_buf(),
        message: message.to_string(),
    }
}

/// Derives the relative display name for `path` under `root`.
///
/// Components are joined with `/` regardless of platform so the name is
/// stable as a remote display name.
fn rel_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[async_trait::async_trait]
impl LocalSource for FsSource {
    async fn enumerate(
        &self,
        dir: &Path,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<LocalCandidate>, SyncError> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| enumeration_error(dir, format!("invalid pattern: {e}")))?;

        if !dir.is_dir() {
            return Err(enumeration_error(dir, "not a directory"));
        }

        let mut candidates = Vec::new();
        let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&current)
                .await
                .map_err(|e| enumeration_error(&current, e))?;

            loop {
                let entry = entries
                    .next_entry()
                    .await
                    .map_err(|e| enumeration_error(&current, e))?;
                let Some(entry) = entry else { break };
                let path = entry.path();

                let file_type = match entry.file_type().await {
                    Ok(ft) => ft,
                    Err(e) => {
                        // Entry vanished mid-scan; the next cycle will see it
                        warn!(path = %path.display(), error = %e, "Skipping unstattable entry");
                        continue;
                    }
                };

                if file_type.is_dir() {
                    if recursive {
                        pending.push(path);
                    }
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !pattern.matches(&file_name) {
                    continue;
                }

                let metadata = match entry.metadata().await {
                    Ok(m) => m,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unstattable file");
                        continue;
                    }
                };

                let modified: Option<DateTime<Utc>> =
                    metadata.modified().ok().map(DateTime::<Utc>::from);

                let Some(name) = rel_name(dir, &path) else {
                    continue;
                };

                candidates.push(LocalCandidate {
                    rel_name: name,
                    abs_path: path,
                    size: metadata.len(),
                    modified,
                });
            }
        }

        // Deterministic order keeps logs and tests stable; the engine
        // itself needs no ordering between candidates.
        candidates.sort_by(|a, b| a.rel_name.cmp(&b.rel_name));

        debug!(
            dir = %dir.display(),
            count = candidates.len(),
            recursive,
            "Enumerated local candidates"
        );
        Ok(candidates)
    }
}
