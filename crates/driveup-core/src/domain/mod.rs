//! Domain layer: entities, value objects, and pure decision logic
//!
//! - [`newtypes`] - validated wrappers for fingerprints, remote IDs, scopes
//! - [`candidate`] - per-cycle entities (candidates, remote entries, summaries)
//! - [`decision`] - the pure Match Decider
//! - [`errors`] - the sync error taxonomy

pub mod candidate;
pub mod decision;
pub mod errors;
pub mod newtypes;
