//! `RemoteStore` implementation backed by the Drive API
//!
//! Thin adapter that routes the core's port operations to the [`files`]
//! and [`upload`] modules. Holds no state beyond the client handle, so it
//! can be shared across worker tasks freely.

use std::path::Path;

use driveup_core::domain::candidate::RemoteEntry;
use driveup_core::domain::newtypes::{FolderScope, RemoteId};
use driveup_core::ports::remote_store::{ListPage, RemoteStore};

use crate::client::DriveClient;
use crate::{files, upload};

/// Google Drive implementation of the [`RemoteStore`] port
pub struct DriveStore {
    client: DriveClient,
}

impl DriveStore {
    /// Wraps an authenticated Drive client
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RemoteStore for DriveStore {
    async fn list_page(
        &self,
        scope: &FolderScope,
        page_token: Option<&str>,
    ) -> anyhow::Result<ListPage> {
        files::list_page(&self.client, scope, page_token).await
    }

    async fn create_file(
        &self,
        local_path: &Path,
        scope: &FolderScope,
        name: &str,
    ) -> anyhow::Result<RemoteEntry> {
        upload::create_file(&self.client, local_path, scope, name).await
    }

    async fn update_file(&self, id: &RemoteId, local_path: &Path) -> anyhow::Result<RemoteEntry> {
        upload::update_file(&self.client, id, local_path).await
    }
}
