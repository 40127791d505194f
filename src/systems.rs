#![warn(clippy::all, clippy::pedantic)]

//! Driver layer: the command queue, the gravity timer and the systems that
//! feed both into the [`Engine`].
//!
//! Everything here runs on one thread. Key handlers only enqueue commands;
//! [`command_system`] drains them in arrival order, so the engine never sees
//! two operations at once.

use std::time::Duration;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::event::KeyCode;
use log::{debug, info, trace};

use crate::engine::Engine;

/// The closed set of inputs the driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    MoveDown,
    Drop,
    Start,
    TogglePause,
    Restart,
    Quit,
}

impl Command {
    fn is_movement(self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::Rotate
                | Command::MoveDown
                | Command::Drop
        )
    }
}

/// Key bindings.
#[must_use]
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Char(' ') => Some(Command::Drop),
        KeyCode::Enter | KeyCode::Char('s') => Some(Command::Start),
        KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// FIFO of pending commands.
#[derive(Resource, Debug, Clone)]
pub struct CommandQueue {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

impl CommandQueue {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// A handle other producers can push through.
    #[must_use]
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    pub fn push(&self, command: Command) {
        // The queue owns a receiver, so the channel is never disconnected.
        let _ = self.sender.send(command);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    fn drain(&self) -> Vec<Command> {
        self.receiver.try_iter().collect()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancelable, restartable fixed-interval gravity timer.
#[derive(Resource, Debug, Clone)]
pub struct GravityTimer {
    interval: Duration,
    elapsed: Duration,
    armed: bool,
}

impl GravityTimer {
    /// Starts disarmed.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Full interval until the next tick.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    /// Adds `delta` and reports whether a tick is due. A due tick restarts
    /// the interval.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started yet.
    #[default]
    Idle,
    Running,
    /// Timer canceled, movement input detached.
    Paused,
    GameOver,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Session {
    pub phase: Phase,
    /// Score of the last finished game, for the game-over overlay.
    pub final_score: Option<u32>,
}

/// Drains the queue in order. Returns `true` once `Quit` is seen; anything
/// queued behind it is dropped.
pub fn command_system(world: &mut World) -> bool {
    let commands = world.resource::<CommandQueue>().drain();
    for command in commands {
        if command == Command::Quit {
            info!("Quit requested");
            return true;
        }
        dispatch(world, command);
    }
    false
}

/// Applies one command against the current phase.
pub fn dispatch(world: &mut World, command: Command) {
    let phase = world.resource::<Session>().phase;
    trace!("Dispatching {command:?} in {phase:?}");

    if command.is_movement() {
        if phase == Phase::Running {
            apply_movement(world, command);
        }
        return;
    }

    match command {
        Command::Start => match phase {
            Phase::Idle | Phase::Paused => enter_running(world, false),
            Phase::GameOver => enter_running(world, true),
            Phase::Running => {}
        },
        Command::TogglePause => match phase {
            Phase::Running => {
                world.resource_mut::<GravityTimer>().cancel();
                world.resource_mut::<Session>().phase = Phase::Paused;
                info!("Paused");
            }
            Phase::Paused => enter_running(world, false),
            Phase::Idle | Phase::GameOver => {}
        },
        Command::Restart => enter_running(world, true),
        _ => {}
    }
}

/// Starting or resuming always waits a full interval before the next tick.
fn enter_running(world: &mut World, fresh_game: bool) {
    if fresh_game || world.resource::<Engine>().is_game_over() {
        world.resource_mut::<Engine>().init();
        world.resource_mut::<Session>().final_score = None;
    }
    world.resource_mut::<GravityTimer>().reset();
    world.resource_mut::<Session>().phase = Phase::Running;
    debug!("Running");
}

fn apply_movement(world: &mut World, command: Command) {
    {
        let mut engine = world.resource_mut::<Engine>();
        match command {
            Command::MoveLeft => engine.move_tetromino_left(),
            Command::MoveRight => engine.move_tetromino_right(),
            Command::Rotate => engine.rotate_tetromino(),
            Command::MoveDown => {
                engine.move_tetromino_down();
            }
            Command::Drop => engine.drop_tetromino_down(),
            _ => return,
        }
    }

    // Manual descent restarts the countdown so the timer cannot lock a
    // second time right behind the player.
    if matches!(command, Command::MoveDown | Command::Drop) {
        world.resource_mut::<GravityTimer>().reset();
    }
    check_game_over(world);
}

/// Gravity tick: one row down whenever the timer comes due.
pub fn gravity_system(world: &mut World, delta: Duration) {
    if world.resource::<Session>().phase != Phase::Running {
        return;
    }
    if !world.resource_mut::<GravityTimer>().advance(delta) {
        return;
    }
    let locked = world.resource_mut::<Engine>().move_tetromino_down();
    if locked {
        trace!("Gravity locked a piece");
    }
    check_game_over(world);
}

fn check_game_over(world: &mut World) {
    let (over, score) = {
        let engine = world.resource::<Engine>();
        (engine.is_game_over(), engine.score())
    };
    if !over {
        return;
    }
    world.resource_mut::<GravityTimer>().cancel();
    let mut session = world.resource_mut::<Session>();
    session.phase = Phase::GameOver;
    session.final_score = Some(score);
    info!("Game over with score {score}");
}
