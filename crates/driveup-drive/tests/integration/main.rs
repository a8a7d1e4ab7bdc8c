//! Integration tests for the Drive API adapter
//!
//! Run against a wiremock server standing in for the Drive v3 endpoints.

mod common;
mod test_list;
mod test_upload;
