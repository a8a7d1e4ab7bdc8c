//! driveup-drive - Google Drive v3 API adapter
//!
//! Implements the `driveup-core` remote ports against the Drive REST API:
//!
//! - [`client`] - typed HTTP client with bearer auth and base-URL override
//! - [`files`] - folder listing (paginated `files.list`) and DTO mapping
//! - [`upload`] - resumable uploads that stream file contents
//! - [`auth`] - access-token providers (static, file, environment)
//! - [`provider`] - [`provider::DriveStore`], the `RemoteStore` implementation

pub mod auth;
pub mod client;
pub mod files;
pub mod provider;
pub mod upload;

pub use provider::DriveStore;
