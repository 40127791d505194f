#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are tiny, so usize <-> i32 casts never truncate or wrap
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // Rows and columns are checked non-negative before casting to usize
    clippy::cast_sign_loss
)]

use crate::shapes::{Matrix, TetrominoType};

/// A settled cell: `None` when empty, otherwise the kind that locked there.
pub type Cell = Option<TetrominoType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

/// The settled playfield. Row 0 is the top.
///
/// Rows above the board (`row < 0`) are a hidden spawn area: they count as
/// empty for collision and anything written there is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    /// Settled rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell at `(row, col)`, or `None` when off the board.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Columns must be on the board and rows must not be below it.
    /// Negative rows are allowed.
    #[must_use]
    pub fn is_inside_bounds(&self, row: i32, col: i32) -> bool {
        col >= 0 && (col as usize) < self.width && row < self.height as i32
    }

    /// True above the board or on an unoccupied cell.
    #[must_use]
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        if !self.is_inside_bounds(row, col) {
            return false;
        }
        row < 0 || self.rows[row as usize][col as usize].is_none()
    }

    /// Writes `kind` under every filled cell of `matrix` anchored at `origin`.
    pub fn place(&mut self, matrix: &Matrix, origin: Position, kind: TetrominoType) {
        for (dr, dc) in matrix.cells() {
            let row = origin.row + dr as i32;
            let col = origin.col + dc as i32;
            if row < 0 || !self.is_inside_bounds(row, col) {
                continue;
            }
            self.rows[row as usize][col as usize] = Some(kind);
        }
    }

    /// Indices of fully occupied rows, top to bottom.
    #[must_use]
    pub fn find_completed_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(Option::is_some))
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes the named rows and refills the same number of empty rows at
    /// the top. Rows that stay keep their relative order.
    pub fn clear_rows(&mut self, indices: &[usize]) {
        let before = self.rows.len();
        let mut y = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&y);
            y += 1;
            keep
        });
        let removed = before - self.rows.len();
        for _ in 0..removed {
            self.rows.insert(0, vec![None; self.width]);
        }
    }

    /// Test helper: sets a single settled cell.
    #[cfg(test)]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }
}

/// The falling piece. It lives beside the board until it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub tetromino_type: TetrominoType,
    pub rotation: usize,
    pub position: Position,
    pub ghost_row: i32,
}

impl Tetromino {
    /// Rotation 0 at the spawn anchor.
    ///
    /// The matrix is centered horizontally and lifted so its topmost filled
    /// row lands on row 0.
    #[must_use]
    pub fn new(tetromino_type: TetrominoType, board_width: usize) -> Self {
        let matrix = tetromino_type.shape().matrix(0);
        let size = matrix.size();
        let position = Position {
            row: -(matrix.first_filled_row() as i32),
            col: (board_width / 2) as i32 - (size / 2) as i32,
        };
        Self {
            tetromino_type,
            rotation: 0,
            position,
            ghost_row: position.row,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> &'static Matrix {
        self.tetromino_type.shape().matrix(self.rotation)
    }

    /// Ghost anchor: same column and rotation, row replaced by the landing row.
    #[must_use]
    pub fn ghost_position(&self) -> Position {
        Position {
            row: self.ghost_row,
            col: self.position.col,
        }
    }

    /// Absolute `(row, col)` of every filled cell at `origin`.
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = (i32, i32)> {
        self.matrix()
            .cells()
            .map(move |(dr, dc)| (origin.row + dr as i32, origin.col + dc as i32))
    }
}
