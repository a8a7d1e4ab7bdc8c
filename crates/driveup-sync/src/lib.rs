//! driveup-sync - The synchronization decision engine
//!
//! Drives one-directional, additive sync of a local directory into a
//! remote folder scope:
//!
//! - [`fingerprint`] - streaming MD5 content fingerprinter
//! - [`scanner`] - local candidate enumeration with glob filtering
//! - [`resolver`] - per-cycle remote index snapshot with retry/backoff
//! - [`executor`] - upload execution (create or update-in-place)
//! - [`engine`] - the scan cycle orchestrator
//! - [`scheduler`] - the daemon loop (interval ticks, cancellation)
//!
//! ## Flow
//!
//! ```text
//! Scheduler ──→ SyncEngine::run_cycle
//!                  │ enumerate (scanner)
//!                  │ resolve index once (resolver)
//!                  └ per candidate: fingerprint → decide → upload
//!                          ↓
//!                    CycleSummary ──→ logged by the scheduler
//! ```

pub mod backoff;
pub mod engine;
pub mod executor;
pub mod fingerprint;
pub mod resolver;
pub mod scanner;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testutil;
