#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::time::Duration;

use crate::Time;
use crate::config::Config;
use crate::engine::Engine;
use crate::systems::{
    Command, CommandQueue, GravityTimer, Phase, Session, command_system, gravity_system,
};

pub type AppResult<T> = anyhow::Result<T>;

/// Owns the driver world: the engine plus the timer, queue and session
/// resources that drive it.
pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub show_ghost: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let engine = match config.seed {
            Some(seed) => Engine::with_seed(seed),
            None => Engine::new(),
        };

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(engine);
        world.insert_resource(GravityTimer::new(config.gravity_interval()));
        world.insert_resource(CommandQueue::new());
        world.insert_resource(Session::default());

        Self {
            world,
            should_quit: false,
            show_ghost: config.show_ghost,
        }
    }

    pub fn push(&self, command: Command) {
        self.world.resource::<CommandQueue>().push(command);
    }

    /// One driver frame: pending commands first, then gravity.
    pub fn update(&mut self, delta: Duration) {
        if command_system(&mut self.world) {
            self.should_quit = true;
            return;
        }
        gravity_system(&mut self.world, delta);
    }

    /// Frame driven by the shared [`Time`] resource.
    pub fn on_tick(&mut self) {
        let delta = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta()
        };
        self.update(delta);
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        self.world.resource::<Engine>()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.world.resource::<Session>()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session().phase
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
