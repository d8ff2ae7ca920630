pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod game;
pub mod snapshot;
pub mod ui;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

/// Monotonic frame clock feeding elapsed time into the engine.
#[derive(Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Elapsed time of the last frame in whole milliseconds.
    #[must_use]
    pub fn delta_millis(&self) -> u32 {
        u32::try_from(self.delta.as_millis()).unwrap_or(u32::MAX)
    }
}
