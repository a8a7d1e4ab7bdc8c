//! Upload tests: resumable create and update-in-place

use std::io::Write;

use driveup_core::domain::newtypes::{FolderScope, RemoteId};
use driveup_core::ports::remote_store::RemoteStore;
use driveup_drive::DriveStore;

use crate::common::{mount_resumable_create, mount_resumable_update, setup_drive_mock};

fn temp_file_with(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_create_file_returns_entry() {
    let (server, client) = setup_drive_mock().await;
    mount_resumable_create(
        &server,
        serde_json::json!({
            "id": "new-1",
            "name": "notes.txt",
            "md5Checksum": "9e107d9d372bb6826bd81d3542a419d6",
            "size": "43",
            "modifiedTime": "2026-03-02T12:00:00Z"
        }),
    )
    .await;

    let local = temp_file_with(b"The quick brown fox jumps over the lazy dog");
    let store = DriveStore::new(client);

    let entry = store
        .create_file(local.path(), &FolderScope::Root, "notes.txt")
        .await
        .unwrap();

    assert_eq!(entry.id.as_str(), "new-1");
    assert_eq!(entry.name, "notes.txt");
    assert_eq!(
        entry.md5.unwrap().as_str(),
        "9e107d9d372bb6826bd81d3542a419d6"
    );
    assert_eq!(entry.size, Some(43));
}

#[tokio::test]
async fn test_create_file_into_folder_scope() {
    let (server, client) = setup_drive_mock().await;
    mount_resumable_create(
        &server,
        serde_json::json!({ "id": "new-2", "name": "a.bin" }),
    )
    .await;

    let local = temp_file_with(&[0u8; 128]);
    let scope = FolderScope::from_config("folder-3").unwrap();
    let store = DriveStore::new(client);

    let entry = store.create_file(local.path(), &scope, "a.bin").await.unwrap();
    assert_eq!(entry.id.as_str(), "new-2");
}

#[tokio::test]
async fn test_update_file_overwrites_by_id() {
    let (server, client) = setup_drive_mock().await;
    mount_resumable_update(
        &server,
        "existing-9",
        serde_json::json!({
            "id": "existing-9",
            "name": "notes.txt",
            "md5Checksum": "d41d8cd98f00b204e9800998ecf8427e",
            "size": "0"
        }),
    )
    .await;

    let local = temp_file_with(b"");
    let store = DriveStore::new(client);
    let id = RemoteId::new("existing-9").unwrap();

    let entry = store.update_file(&id, local.path()).await.unwrap();
    assert_eq!(entry.id.as_str(), "existing-9");
    assert_eq!(entry.size, Some(0));
}

#[tokio::test]
async fn test_create_file_missing_local_file() {
    let (_server, client) = setup_drive_mock().await;
    let store = DriveStore::new(client);

    let result = store
        .create_file(
            std::path::Path::new("/nonexistent/file.txt"),
            &FolderScope::Root,
            "file.txt",
        )
        .await;
    assert!(result.is_err());
}
