//! driveup-core - Domain logic for the driveup sync engine
//!
//! This crate contains the provider-agnostic heart of driveup:
//!
//! - [`domain`] - entities, newtypes, the pure upload decider, and errors
//! - [`ports`] - traits implemented by adapter crates (remote store,
//!   token provider, local file source)
//! - [`config`] - typed configuration with validation and env overrides
//!
//! Nothing in this crate performs I/O; adapters live in `driveup-drive`
//! and `driveup-sync`.

pub mod config;
pub mod domain;
pub mod ports;
