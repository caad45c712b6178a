use std::time::Duration;

use rand::Rng;

/// Bounds for the random pause between catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingOptions {
    pub min: Duration,
    pub max: Duration,
}

impl Default for PacingOptions {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(5),
            max: Duration::from_secs(30),
        }
    }
}

impl PacingOptions {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }
}

/// Sample a pause uniformly from `[min, max]`.
pub fn sample_delay<R: Rng + ?Sized>(rng: &mut R, options: &PacingOptions) -> Duration {
    if options.min >= options.max {
        return options.min;
    }
    rng.gen_range(options.min..=options.max)
}

/// Suspends the generator between entries.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
#[path = "tests/pacing_tests.rs"]
mod tests;
