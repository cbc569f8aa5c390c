pub mod app;
pub mod collision;
pub mod components;
pub mod config;
pub mod game;
pub mod highscore;
pub mod input;
pub mod session;
pub mod ui;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

/// Tracks wall-clock time since the last gravity step.
#[derive(Debug, Clone)]
pub struct GravityTimer {
    last_fall: Instant,
}

impl GravityTimer {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self { last_fall: now }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_fall = now;
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_fall)
    }

    /// True once strictly more than `interval` has passed.
    #[must_use]
    pub fn due(&self, interval: Duration, now: Instant) -> bool {
        self.elapsed(now) > interval
    }
}
