#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

//! Game-state engine.
//!
//! Pure state transitions: no timers, no I/O. Whoever drives the engine
//! (see [`crate::systems`]) owns gravity timing and must serialize calls.
//! Invalid moves are silent no-ops, and so is every movement call once the
//! game is over.

use bevy_ecs::prelude::Resource;
use log::{debug, info, trace};

use crate::components::{Board, Position, Tetromino};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, lock_score};
use crate::shapes::TetrominoType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
}

#[derive(Resource, Debug, Clone)]
pub struct Engine {
    board: Board,
    active: Tetromino,
    next: TetrominoType,
    score: u32,
    lines_cleared: u32,
    status: Status,
    rng: fastrand::Rng,
}

impl Engine {
    /// Standard 10x20 engine seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(BOARD_WIDTH, BOARD_HEIGHT, fastrand::Rng::new())
    }

    /// Standard 10x20 engine with a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(BOARD_WIDTH, BOARD_HEIGHT, fastrand::Rng::with_seed(seed))
    }

    #[must_use]
    pub fn with_rng(width: usize, height: usize, mut rng: fastrand::Rng) -> Self {
        let first = TetrominoType::random(&mut rng);
        let next = TetrominoType::random(&mut rng);
        let mut engine = Self {
            board: Board::new(width, height),
            active: Tetromino::new(first, width),
            next,
            score: 0,
            lines_cleared: 0,
            status: Status::Playing,
            rng,
        };
        engine.compute_ghost();
        engine
    }

    /// Fresh game: empty board, zero score, new active and next pieces.
    pub fn init(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.status = Status::Playing;
        let first = TetrominoType::random(&mut self.rng);
        self.active = Tetromino::new(first, self.board.width());
        self.next = TetrominoType::random(&mut self.rng);
        self.compute_ghost();
        info!(
            "New game: active {}, next {}",
            self.active.tetromino_type.name(),
            self.next.name()
        );
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    #[must_use]
    pub fn ghost_row(&self) -> i32 {
        self.active.ghost_row
    }

    #[must_use]
    pub fn next(&self) -> TetrominoType {
        self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// Collision predicate shared by every move.
    ///
    /// Each filled cell of the rotated matrix must land in a column on the
    /// board, not below the last row, and on an empty cell. The falling
    /// piece itself is never on the board, so it cannot block itself.
    #[must_use]
    pub fn can_place(&self, kind: TetrominoType, rotation: usize, origin: Position) -> bool {
        kind.shape()
            .matrix(rotation)
            .cells()
            .all(|(dr, dc)| {
                self.board
                    .is_empty(origin.row + dr as i32, origin.col + dc as i32)
            })
    }

    fn fits(&self, piece: &Tetromino) -> bool {
        self.can_place(piece.tetromino_type, piece.rotation, piece.position)
    }

    fn try_shift(&mut self, d_row: i32, d_col: i32) -> bool {
        let mut moved = self.active;
        moved.position.row += d_row;
        moved.position.col += d_col;
        if !self.fits(&moved) {
            return false;
        }
        self.active = moved;
        self.compute_ghost();
        true
    }

    pub fn move_tetromino_left(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.try_shift(0, -1);
    }

    pub fn move_tetromino_right(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.try_shift(0, 1);
    }

    /// Next rotation state, reverted when it would collide. No kicks.
    pub fn rotate_tetromino(&mut self) {
        if self.is_game_over() {
            return;
        }
        let count = self.active.tetromino_type.shape().rotation_count();
        let mut rotated = self.active;
        rotated.rotation = (rotated.rotation + 1) % count;
        if self.fits(&rotated) {
            self.active = rotated;
            self.compute_ghost();
        } else {
            trace!("Rotation of {} blocked", self.active.tetromino_type.name());
        }
    }

    /// One row down. Returns `true` when the piece could not descend and was
    /// locked instead; check [`Engine::is_game_over`] afterwards.
    pub fn move_tetromino_down(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        if self.try_shift(1, 0) {
            return false;
        }
        self.lock();
        true
    }

    /// Falls to the landing row and locks once.
    pub fn drop_tetromino_down(&mut self) {
        if self.is_game_over() {
            return;
        }
        while self.try_shift(1, 0) {}
        self.lock();
    }

    /// Recomputes the landing row of the active piece without moving it.
    pub fn compute_ghost(&mut self) {
        let mut landing = self.active;
        loop {
            landing.position.row += 1;
            if !self.fits(&landing) {
                break;
            }
        }
        self.active.ghost_row = landing.position.row - 1;
    }

    fn lock(&mut self) {
        let piece = self.active;
        debug!(
            "Locking {} at ({}, {})",
            piece.tetromino_type.name(),
            piece.position.row,
            piece.position.col
        );
        self.board
            .place(piece.matrix(), piece.position, piece.tetromino_type);

        let completed = self.board.find_completed_rows();
        if !completed.is_empty() {
            self.board.clear_rows(&completed);
            self.lines_cleared += completed.len() as u32;
            info!("Cleared {} rows", completed.len());
        }
        self.score += lock_score(completed.len());

        self.spawn();
    }

    fn spawn(&mut self) {
        let kind = self.next;
        self.active = Tetromino::new(kind, self.board.width());
        self.next = TetrominoType::random(&mut self.rng);
        if self.fits(&self.active) {
            self.compute_ghost();
        } else {
            info!("Spawn of {} blocked, game over at {}", kind.name(), self.score);
            self.status = Status::GameOver;
        }
    }

    /// Test helper: direct access to the settled board.
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Test helper: replaces the falling piece.
    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Tetromino) {
        self.active = piece;
        self.compute_ghost();
    }

    /// Test helper: replaces the lookahead piece.
    #[cfg(test)]
    pub(crate) fn set_next(&mut self, kind: TetrominoType) {
        self.next = kind;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
