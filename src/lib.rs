pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod game;
pub mod shapes;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Wall-clock delta between driver frames.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Time {
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

    pub fn delta(&self) -> Duration {
        self.delta
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
