//! In-memory test doubles shared by the engine, resolver, and scheduler
//! tests

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use driveup_core::domain::candidate::RemoteEntry;
use driveup_core::domain::newtypes::{FolderScope, RemoteId};
use driveup_core::ports::remote_store::{ListPage, RemoteStore};

use crate::fingerprint;

/// In-memory [`RemoteStore`] double
///
/// Entries are served in pages; uploads hash the local file so a second
/// cycle sees the same fingerprint Drive would report. Failure injection
/// covers transient listing errors and per-name upload errors.
pub(crate) struct MockStore {
    entries: Mutex<Vec<RemoteEntry>>,
    page_size: usize,
    /// Remaining list_page calls to fail before succeeding
    list_failures: AtomicUsize,
    /// Names whose create/update always fails
    failing_uploads: Mutex<HashSet<String>>,
    /// Artificial latency inside list_page (for scheduler timing tests)
    list_delay: Duration,
    list_calls: AtomicUsize,
    created: Mutex<Vec<String>>,
    updated: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    /// Set while a listing is in flight; trips if cycles ever overlap
    listing_in_flight: AtomicBool,
    overlap_detected: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            page_size: 100,
            list_failures: AtomicUsize::new(0),
            failing_uploads: Mutex::new(HashSet::new()),
            list_delay: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            listing_in_flight: AtomicBool::new(false),
            overlap_detected: AtomicBool::new(false),
        }
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_list_failures(self, failures: usize) -> Self {
        self.list_failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn fail_uploads_of(&self, name: &str) {
        self.failing_uploads.lock().unwrap().insert(name.to_string());
    }

    pub fn seed(&self, entries: Vec<RemoteEntry>) {
        *self.entries.lock().unwrap() = entries;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated_names(&self) -> Vec<String> {
        self.updated.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }

    pub fn overlap_detected(&self) -> bool {
        self.overlap_detected.load(Ordering::SeqCst)
    }

    async fn hashed_entry(&self, name: &str, id: String, local_path: &Path) -> anyhow::Result<RemoteEntry> {
        let md5 = fingerprint::fingerprint(local_path)
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        let size = tokio::fs::metadata(local_path).await?.len();
        Ok(RemoteEntry {
            name: name.to_string(),
            id: RemoteId::new(id)?,
            md5: Some(md5),
            size: Some(size),
            modified: Some(Utc::now()),
        })
    }
}

#[async_trait::async_trait]
impl RemoteStore for MockStore {
    async fn list_page(
        &self,
        _scope: &FolderScope,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.listing_in_flight.swap(true, Ordering::SeqCst) {
            self.overlap_detected.store(true, Ordering::SeqCst);
        }
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        self.listing_in_flight.store(false, Ordering::SeqCst);

        let remaining = self.list_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.list_failures.store(remaining - 1, Ordering::SeqCst);
            }
            anyhow::bail!("injected listing failure");
        }

        let offset: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let entries = self.entries.lock().unwrap();
        let end = (offset + self.page_size).min(entries.len());
        let page: Vec<RemoteEntry> = entries[offset..end].to_vec();
        let next_page_token = if end < entries.len() {
            Some(end.to_string())
        } else {
            None
        };
        Ok(ListPage {
            entries: page,
            next_page_token,
        })
    }

    async fn create_file(
        &self,
        local_path: &Path,
        _scope: &FolderScope,
        name: &str,
    ) -> anyhow::Result<RemoteEntry> {
        if self.failing_uploads.lock().unwrap().contains(name) {
            anyhow::bail!("injected upload failure for {name}");
        }
        let id = format!("mock-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let entry = self.hashed_entry(name, id, local_path).await?;
        self.entries.lock().unwrap().push(entry.clone());
        self.created.lock().unwrap().push(name.to_string());
        Ok(entry)
    }

    async fn update_file(&self, id: &RemoteId, local_path: &Path) -> anyhow::Result<RemoteEntry> {
        let name = {
            let entries = self.entries.lock().unwrap();
            entries
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.name.clone())
                .ok_or_else(|| anyhow::anyhow!("no entry with id {id}"))?
        };
        if self.failing_uploads.lock().unwrap().contains(&name) {
            anyhow::bail!("injected upload failure for {name}");
        }
        let entry = self.hashed_entry(&name, id.as_str().to_string(), local_path).await?;
        {
            let mut entries = self.entries.lock().unwrap();
            if let Some(existing) = entries.iter_mut().find(|e| &e.id == id) {
                *existing = entry.clone();
            }
        }
        self.updated.lock().unwrap().push(name);
        Ok(entry)
    }
}
