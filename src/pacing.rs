//! Randomized human-like pacing.
//!
//! Every pause in a trade or recording session goes through a [`Pacer`],
//! which draws a duration uniformly from a [`PauseRange`] and hands it to a
//! [`Clock`]. Production uses [`TokioClock`]; tests substitute a clock that
//! records requested durations without sleeping, and a seeded RNG.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Something that can wait.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock sleeping on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// An inclusive range of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauseRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for PauseRange {
    fn default() -> Self {
        Self::between(0.0, 0.0)
    }
}

impl PauseRange {
    /// Create a range from `min_secs` to `max_secs`.
    pub const fn between(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// A range that always yields `secs`.
    pub const fn exactly(secs: f64) -> Self {
        Self::between(secs, secs)
    }

    /// Check the range is finite, non-negative and ordered.
    pub fn check(&self) -> std::result::Result<(), String> {
        if !self.min_secs.is_finite() || !self.max_secs.is_finite() {
            return Err("bounds must be finite".to_string());
        }
        if self.min_secs < 0.0 {
            return Err(format!("min_secs {} is negative", self.min_secs));
        }
        if self.min_secs > self.max_secs {
            return Err(format!(
                "min_secs {} exceeds max_secs {}",
                self.min_secs, self.max_secs
            ));
        }
        Ok(())
    }
}

/// Draws randomized pauses and waits them out.
pub struct Pacer {
    rng: StdRng,
    clock: Arc<dyn Clock>,
}

impl Pacer {
    /// Create a pacer seeded from OS entropy.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(StdRng::from_entropy(), clock)
    }

    /// Create a pacer with a caller-supplied RNG.
    pub fn with_rng(rng: StdRng, clock: Arc<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    /// Draw a duration uniformly from `range` without waiting.
    pub fn draw(&mut self, range: PauseRange) -> Duration {
        let secs = if range.min_secs >= range.max_secs {
            range.min_secs
        } else {
            self.rng.gen_range(range.min_secs..=range.max_secs)
        };
        Duration::from_secs_f64(secs.max(0.0))
    }

    /// Wait for a duration drawn from `range` and return it.
    pub async fn delay(&mut self, range: PauseRange) -> Duration {
        let duration = self.draw(range);
        self.clock.sleep(duration).await;
        duration
    }

    /// The clock this pacer waits on.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer").finish_non_exhaustive()
    }
}
