#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Side length of the next-piece preview grid
pub const PREVIEW_SIZE: usize = 4;

// Gravity timing (constant, no level speedup)
pub const GRAVITY_INTERVAL_MS: u64 = 700;

// Awarded on every lock, whether or not rows were cleared
pub const LOCK_POINTS: u32 = 10;

// Line clear bonus indexed by rows cleared in a single lock
pub const POINTS_SINGLE: u32 = 40;
pub const POINTS_DOUBLE: u32 = 100;
pub const POINTS_TRIPLE: u32 = 300;
pub const POINTS_TETRIS: u32 = 1200;

pub const LINE_POINTS: [u32; 5] = [0, POINTS_SINGLE, POINTS_DOUBLE, POINTS_TRIPLE, POINTS_TETRIS];

/// Points for one lock that cleared `rows` rows.
///
/// Always at least [`LOCK_POINTS`], and grows faster than linearly with
/// `rows`, so clearing several rows at once beats clearing them one by one.
#[must_use]
pub fn lock_score(rows: usize) -> u32 {
    LOCK_POINTS + LINE_POINTS.get(rows).copied().unwrap_or(POINTS_TETRIS)
}
