#![warn(clippy::all, clippy::pedantic)]

//! The fixed piece catalog.
//!
//! Every shape is a square boolean matrix. Rotation states are generated
//! once, by turning the spawn matrix clockwise until it comes back to a
//! matrix already seen, and then never change.

use once_cell::sync::Lazy;

/// Largest matrix side length in the catalog (the I piece).
pub const MAX_MATRIX_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    /// Uniform draw over the whole catalog.
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
            TetrominoType::O => "O",
            TetrominoType::S => "S",
            TetrominoType::T => "T",
            TetrominoType::Z => "Z",
        }
    }

    #[must_use]
    pub fn shape(self) -> &'static Shape {
        &CATALOG[self as usize]
    }

    fn spawn_rows(self) -> &'static [&'static [u8]] {
        match self {
            TetrominoType::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            TetrominoType::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
            TetrominoType::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
        }
    }
}

/// A square occupancy matrix of side `size` (2, 3 or 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Matrix {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (r, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.len(), rows.len(), "piece matrices must be square");
            for (c, &value) in row.iter().enumerate() {
                cells[r][c] = value != 0;
            }
        }
        Self {
            size: rows.len(),
            cells,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupied `(row, col)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size)
            .flat_map(move |r| (0..self.size).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.cells[r][c])
    }

    /// Index of the topmost row holding at least one occupied cell.
    #[must_use]
    pub fn first_filled_row(&self) -> usize {
        (0..self.size)
            .find(|&r| self.cells[r][..self.size].iter().any(|&filled| filled))
            .unwrap_or(0)
    }

    /// Quarter turn clockwise: `new[r][c] = old[size - 1 - c][r]`.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(self.size) {
            for (c, cell) in row.iter_mut().enumerate().take(self.size) {
                *cell = self.cells[self.size - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: TetrominoType,
    rotations: Vec<Matrix>,
}

impl Shape {
    fn build(kind: TetrominoType) -> Self {
        let spawn = Matrix::from_rows(kind.spawn_rows());
        let mut rotations = vec![spawn];
        let mut next = spawn.rotated_cw();
        while !rotations.contains(&next) {
            rotations.push(next);
            next = next.rotated_cw();
        }
        Self { kind, rotations }
    }

    #[must_use]
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Matrix for `rotation`, wrapped into range.
    #[must_use]
    pub fn matrix(&self, rotation: usize) -> &Matrix {
        &self.rotations[rotation % self.rotations.len()]
    }
}

static CATALOG: Lazy<Vec<Shape>> =
    Lazy::new(|| TetrominoType::ALL.iter().map(|&kind| Shape::build(kind)).collect());
