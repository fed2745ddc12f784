//! Retry backoff and politeness delays
//!
//! Both policies are plain values that turn a random source into a
//! [`Duration`]; the fetcher owns the sleeping. Tests inject a seeded RNG.

use crate::config::FetchConfig;
use rand::Rng;
use std::time::Duration;

/// Exponential backoff with additive jitter, capped at a maximum wait
///
/// The wait after the `n`-th failed attempt (1-based) is
/// `min(initial * 2^(n-1) + uniform(0, jitter), max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub initial: Duration,
    pub max: Duration,
    pub jitter: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial: Duration::from_millis(config.initial_backoff_ms),
            max: Duration::from_millis(config.max_backoff_ms),
            jitter: Duration::from_millis(config.jitter_ms),
        }
    }

    /// Returns true if another attempt is allowed after `attempt` failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Computes the wait after the given failed attempt (1-based)
    pub fn backoff<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let base = self.initial.saturating_mul(1u32 << exponent);
        let jitter = random_between(Duration::ZERO, self.jitter, rng);
        base.saturating_add(jitter).min(self.max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

/// Self-imposed pause after every request attempt, uniform in `[min, max]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Politeness {
    pub min: Duration,
    pub max: Duration,
}

impl Politeness {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            min: Duration::from_millis(config.politeness_min_ms),
            max: Duration::from_millis(config.politeness_max_ms),
        }
    }

    pub fn delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        random_between(self.min, self.max, rng)
    }
}

impl Default for Politeness {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

fn random_between<R: Rng + ?Sized>(low: Duration, high: Duration, rng: &mut R) -> Duration {
    if high <= low {
        return low;
    }
    let millis = rng.random_range(low.as_millis() as u64..=high.as_millis() as u64);
    Duration::from_millis(millis)
}
