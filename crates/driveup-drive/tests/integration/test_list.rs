//! Listing tests: pagination, scope queries, and DTO mapping

use driveup_core::domain::newtypes::FolderScope;
use driveup_core::ports::remote_store::RemoteStore;
use driveup_drive::DriveStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{mount_list_paginated, mount_list_single_page, setup_drive_mock};

#[tokio::test]
async fn test_list_single_page_maps_entries() {
    let (server, client) = setup_drive_mock().await;
    mount_list_single_page(
        &server,
        serde_json::json!([
            {
                "id": "f1",
                "name": "report.pdf",
                "md5Checksum": "d41d8cd98f00b204e9800998ecf8427e",
                "size": "2048",
                "modifiedTime": "2026-03-01T08:30:00Z"
            },
            {
                "id": "f2",
                "name": "native-doc"
            }
        ]),
    )
    .await;

    let store = DriveStore::new(client);
    let page = store.list_page(&FolderScope::Root, None).await.unwrap();

    assert_eq!(page.entries.len(), 2);
    assert!(page.next_page_token.is_none());

    let report = &page.entries[0];
    assert_eq!(report.name, "report.pdf");
    assert_eq!(report.id.as_str(), "f1");
    assert_eq!(
        report.md5.as_ref().unwrap().as_str(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
    assert_eq!(report.size, Some(2048));

    // Docs-native entries come through without hash or size
    let native = &page.entries[1];
    assert!(native.md5.is_none());
    assert!(native.size.is_none());
}

#[tokio::test]
async fn test_list_passes_page_token_through() {
    let (server, client) = setup_drive_mock().await;
    mount_list_paginated(
        &server,
        serde_json::json!([{ "id": "f1", "name": "a.txt" }]),
        serde_json::json!([{ "id": "f2", "name": "b.txt" }]),
    )
    .await;

    let store = DriveStore::new(client);

    let first = store.list_page(&FolderScope::Root, None).await.unwrap();
    assert_eq!(first.entries[0].name, "a.txt");
    assert_eq!(first.next_page_token.as_deref(), Some("page2"));

    let second = store
        .list_page(&FolderScope::Root, first.next_page_token.as_deref())
        .await
        .unwrap();
    assert_eq!(second.entries[0].name, "b.txt");
    assert!(second.next_page_token.is_none());
}

#[tokio::test]
async fn test_list_scopes_query_to_folder() {
    let (server, client) = setup_drive_mock().await;

    // Only a query scoped to the folder ID gets a response; a wrong scope
    // would fall through to the mock server's default 404.
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("q", "'folder-7' in parents and trashed = false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": [{ "id": "f9", "name": "scoped.txt" }]
        })))
        .mount(&server)
        .await;

    let scope = FolderScope::from_config("folder-7").unwrap();
    let store = DriveStore::new(client);
    let page = store.list_page(&scope, None).await.unwrap();
    assert_eq!(page.entries[0].name, "scoped.txt");
}

#[tokio::test]
async fn test_list_error_status_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = driveup_drive::client::DriveClient::with_base_urls(
        std::sync::Arc::new(driveup_drive::auth::StaticTokenProvider::new("t")),
        server.uri(),
        format!("{}/upload", server.uri()),
    );
    let store = DriveStore::new(client);
    assert!(store.list_page(&FolderScope::Root, None).await.is_err());
}
