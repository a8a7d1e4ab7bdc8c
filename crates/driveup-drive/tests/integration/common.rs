//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for Drive v3 endpoints.
//! Each helper mounts the necessary mock endpoints and returns a
//! configured DriveClient pointing at the mock server.

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use driveup_drive::auth::StaticTokenProvider;
use driveup_drive::client::DriveClient;

/// Starts a mock server and returns it with a client whose metadata and
/// upload base URLs both point at the server (uploads under `/upload`).
pub async fn setup_drive_mock() -> (MockServer, DriveClient) {
    let server = MockServer::start().await;
    let client = DriveClient::with_base_urls(
        Arc::new(StaticTokenProvider::new("test-access-token")),
        server.uri(),
        format!("{}/upload", server.uri()),
    );
    (server, client)
}

/// Mounts a files.list endpoint returning a single page with the given files.
pub async fn mount_list_single_page(server: &MockServer, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "files": files })),
        )
        .mount(server)
        .await;
}

/// Mounts a files.list endpoint returning two pages (pagination test).
///
/// The first request (no pageToken) returns page 1 with `nextPageToken`;
/// the request carrying `pageToken=page2` returns page 2 without one.
pub async fn mount_list_paginated(
    server: &MockServer,
    page1_files: serde_json::Value,
    page2_files: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": page2_files
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": page1_files,
            "nextPageToken": "page2"
        })))
        .mount(server)
        .await;
}

/// Mounts the resumable create endpoints: session initiation plus the
/// content PUT, responding with the given file resource.
pub async fn mount_resumable_create(server: &MockServer, response_file: serde_json::Value) {
    let session_url = format!("{}/upload-session-1", server.uri());

    Mock::given(method("POST"))
        .and(path("/upload/files"))
        .and(query_param("uploadType", "resumable"))
        .respond_with(ResponseTemplate::new(200).append_header("Location", session_url.as_str()))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload-session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_file))
        .mount(server)
        .await;
}

/// Mounts the resumable update endpoints for a specific file ID.
pub async fn mount_resumable_update(
    server: &MockServer,
    file_id: &str,
    response_file: serde_json::Value,
) {
    let session_url = format!("{}/upload-session-2", server.uri());

    Mock::given(method("PATCH"))
        .and(path(format!("/upload/files/{file_id}")))
        .and(query_param("uploadType", "resumable"))
        .respond_with(ResponseTemplate::new(200).append_header("Location", session_url.as_str()))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload-session-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_file))
        .mount(server)
        .await;
}
