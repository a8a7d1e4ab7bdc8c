//! Ports: traits the core calls but does not implement
//!
//! - [`remote_store`] - the remote object store and the authorized
//!   client seam
//! - [`local_source`] - local candidate enumeration

pub mod local_source;
pub mod remote_store;
