//! Daemon scheduling loop
//!
//! Drives repeated scan cycles on a fixed interval until cancelled.
//! Cycles never overlap: the loop awaits each cycle to completion before
//! waiting for the next tick, and missed ticks are delayed rather than
//! bursted. A cycle-fatal error fails that cycle only; the loop logs it
//! and keeps running, since transient outages are expected over a
//! long-lived daemon.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::engine::SyncEngine;

/// Fixed-interval driver for [`SyncEngine::run_cycle`]
pub struct Scheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler ticking every `interval`.
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Runs the loop until `cancel` trips.
    ///
    /// The first cycle starts immediately; subsequent cycles start one
    /// interval after the previous tick, skewed later when a cycle
    /// overruns its slot.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "Scheduler started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Scheduler stopping");
                    return;
                }
                _ = ticker.tick() => {}
            }

            match self.engine.run_cycle(&cancel).await {
                Ok(summary) => {
                    info!(
                        total = summary.total,
                        uploaded = summary.uploaded,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        duration_ms = summary.duration_ms,
                        "Cycle complete"
                    );
                    for failure in &summary.errors {
                        warn!(name = %failure.rel_name, error = %failure.error, "Candidate failed");
                    }
                }
                Err(e) => {
                    error!(error = %e, "Cycle failed; will retry on next tick");
                }
            }
        }
    }
}
