//! Exponential backoff with full jitter
//!
//! Delay for attempt `n` is drawn uniformly from
//! `[0, base * multiplier^n]`, capped at [`MAX_DELAY`]. Full jitter
//! decorrelates retries from concurrent clients hitting the same
//! throttled endpoint.

use std::time::Duration;

use driveup_core::config::RetryConfig;
use rand::Rng;

/// Upper bound on any single backoff delay
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Returns the ceiling for attempt `n` (0-based), before jitter.
fn ceiling(attempt: u32, config: &RetryConfig) -> Duration {
    let millis = config.base_delay_ms as f64 * config.multiplier.powi(attempt as i32);
    let capped = millis.min(MAX_DELAY.as_millis() as f64);
    Duration::from_millis(capped as u64)
}

/// Computes the jittered delay before retry attempt `attempt` (0-based).
pub fn delay(attempt: u32, config: &RetryConfig) -> Duration {
    let max = ceiling(attempt, config);
    if max.is_zero() {
        return Duration::ZERO;
    }
    let millis = rand::thread_rng().gen_range(0..=max.as_millis() as u64);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1000,
            multiplier: 2.0,
        }
    }

    #[test]
    fn test_ceiling_grows_exponentially() {
        let cfg = config();
        assert_eq!(ceiling(0, &cfg), Duration::from_millis(1000));
        assert_eq!(ceiling(1, &cfg), Duration::from_millis(2000));
        assert_eq!(ceiling(2, &cfg), Duration::from_millis(4000));
    }

    #[test]
    fn test_ceiling_is_capped() {
        let cfg = config();
        assert_eq!(ceiling(20, &cfg), MAX_DELAY);
    }

    #[test]
    fn test_delay_within_bounds() {
        let cfg = config();
        for attempt in 0..5 {
            let max = ceiling(attempt, &cfg);
            for _ in 0..50 {
                assert!(delay(attempt, &cfg) <= max);
            }
        }
    }
}
