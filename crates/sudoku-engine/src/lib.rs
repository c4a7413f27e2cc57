//! Sudoku puzzle engine.
//!
//! Generates complete solution grids, carves playable puzzles out of them
//! at a requested difficulty, and solves arbitrary partially-filled grids
//! via backtracking search. The engine holds no long-lived state;
//! persistence and transport belong to the caller.

mod carver;
mod catalog;
mod rng;
mod solver;

pub use carver::{CarveConfig, Carver, ConfigError, Difficulty};
pub use catalog::{Catalog, Puzzle};
pub use solver::{SolveOutcome, Solver, ValueOrder};

use serde::{Deserialize, Serialize};

/// Side length of the grid.
pub const GRID_SIZE: usize = 9;
/// Side length of one box.
pub const BOX_SIZE: usize = 3;
/// Total number of cells.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A cell coordinate. Both components are in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position. Panics if either coordinate is out of range;
    /// out-of-range coordinates are a caller bug, not a runtime condition.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < GRID_SIZE && col < GRID_SIZE,
            "position out of range: ({row}, {col})"
        );
        Self { row, col }
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(|i| Position {
            row: i / GRID_SIZE,
            col: i % GRID_SIZE,
        })
    }

    /// Top-left corner of the 3x3 box containing this position.
    pub fn box_origin(&self) -> Position {
        Position {
            row: self.row / BOX_SIZE * BOX_SIZE,
            col: self.col / BOX_SIZE * BOX_SIZE,
        }
    }
}

/// A 9x9 grid of digits `0..=9`, where `0` marks an empty cell.
///
/// Serializes as a bare nested array in row-major order, which is the
/// shape the surrounding system stores and serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// An all-empty grid.
    pub fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Build a grid from raw rows. Panics if any value exceeds 9.
    pub fn from_rows(cells: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        for row in &cells {
            for &v in row {
                assert!(v <= 9, "cell value out of range: {v}");
            }
        }
        Self { cells }
    }

    /// Parse an 81-character puzzle string (`'0'` or `'.'` for empty).
    pub fn from_string(s: &str) -> Option<Self> {
        let mut grid = Self::empty();
        let mut count = 0;
        for (i, ch) in s.chars().enumerate() {
            if i >= CELL_COUNT {
                return None;
            }
            let v = match ch {
                '.' => 0,
                d => d.to_digit(10)? as u8,
            };
            grid.cells[i / GRID_SIZE][i % GRID_SIZE] = v;
            count += 1;
        }
        if count == CELL_COUNT {
            Some(grid)
        } else {
            None
        }
    }

    /// Value at a position.
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Set a position to a value. Panics if the value exceeds 9.
    pub fn set(&mut self, pos: Position, value: u8) {
        assert!(value <= 9, "cell value out of range: {value}");
        self.cells[pos.row][pos.col] = value;
    }

    /// The nine values of row `r`.
    pub fn row(&self, r: usize) -> [u8; GRID_SIZE] {
        self.cells[r]
    }

    /// The nine values of column `c`.
    pub fn col(&self, c: usize) -> [u8; GRID_SIZE] {
        let mut out = [0; GRID_SIZE];
        for r in 0..GRID_SIZE {
            out[r] = self.cells[r][c];
        }
        out
    }

    /// The nine values of the box containing `pos`, row-major.
    pub fn box_values(&self, pos: Position) -> [u8; GRID_SIZE] {
        let origin = pos.box_origin();
        let mut out = [0; GRID_SIZE];
        let mut idx = 0;
        for r in origin.row..origin.row + BOX_SIZE {
            for c in origin.col..origin.col + BOX_SIZE {
                out[idx] = self.cells[r][c];
                idx += 1;
            }
        }
        out
    }

    /// First empty cell in row-major scan order, if any.
    pub fn first_empty(&self) -> Option<Position> {
        Position::all().find(|&pos| self.get(pos) == 0)
    }

    /// Number of filled cells.
    pub fn clue_count(&self) -> usize {
        Position::all().filter(|&pos| self.get(pos) != 0).count()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        CELL_COUNT - self.clue_count()
    }

    /// Whether placing `value` at `pos` would break no row, column, or box
    /// constraint. The cell itself is excluded from the scan, so a value
    /// already sitting at `pos` never conflicts with itself.
    ///
    /// Pure predicate, at most 27 comparisons. Panics if `value` is not in
    /// `1..=9`.
    pub fn is_legal(&self, pos: Position, value: u8) -> bool {
        assert!((1..=9).contains(&value), "value out of range: {value}");
        for i in 0..GRID_SIZE {
            if i != pos.col && self.cells[pos.row][i] == value {
                return false;
            }
            if i != pos.row && self.cells[i][pos.col] == value {
                return false;
            }
        }
        let origin = pos.box_origin();
        for r in origin.row..origin.row + BOX_SIZE {
            for c in origin.col..origin.col + BOX_SIZE {
                if (r, c) != (pos.row, pos.col) && self.cells[r][c] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Whether no non-zero value repeats within any row, column, or box.
    /// This is the invariant a grid must keep while being solved.
    pub fn is_consistent(&self) -> bool {
        let mut rows = [0u16; GRID_SIZE];
        let mut cols = [0u16; GRID_SIZE];
        let mut boxes = [0u16; GRID_SIZE];
        for pos in Position::all() {
            let v = self.get(pos);
            if v == 0 {
                continue;
            }
            let bit = 1u16 << v;
            let b = pos.row / BOX_SIZE * BOX_SIZE + pos.col / BOX_SIZE;
            if rows[pos.row] & bit != 0 || cols[pos.col] & bit != 0 || boxes[b] & bit != 0 {
                return false;
            }
            rows[pos.row] |= bit;
            cols[pos.col] |= bit;
            boxes[b] |= bit;
        }
        true
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Whether the grid is a full valid solution: complete, and every row,
    /// column, and box holds each of `1..9` exactly once.
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_consistent()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..GRID_SIZE {
            if r > 0 && r % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for c in 0..GRID_SIZE {
                if c > 0 && c % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[r][c] {
                    0 => write!(f, ". ")?,
                    v => write!(f, "{v} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
