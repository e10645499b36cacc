//! Row-bitmask occupancy grid.
//!
//! One `u32` per row, bit `x` set when column `x` is occupied. A row can be
//! tested for fullness with a single comparison, which is what the food
//! sampler relies on, and the whole grid is exactly the block of words the
//! render shader consumes.

use snake_common::{Cell, GRID_HEIGHT, GRID_WIDTH};

use crate::snake::SnakeBody;

/// Value of a row with every column occupied.
pub const FULL_ROW: u32 = u32::MAX;

/// Occupancy mask for the whole board.
///
/// Derived data: rebuilt from the body and food, never edited in place by
/// gameplay code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridMask {
    rows: [u32; GRID_HEIGHT],
}

impl GridMask {
    /// Creates an empty mask.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [0; GRID_HEIGHT],
        }
    }

    /// Clears the mask and marks every body segment and the food cell.
    ///
    /// Off-board cells (a head that just left the grid) are skipped.
    pub fn rebuild(&mut self, body: &SnakeBody, food: Cell) {
        self.rows = [0; GRID_HEIGHT];
        for &segment in body.segments() {
            self.set(segment);
        }
        self.set(food);
    }

    fn set(&mut self, cell: Cell) {
        if cell.in_bounds() {
            self.rows[cell.y as usize] |= 1 << cell.x;
        }
    }

    /// Returns true if every column of row `y` is occupied.
    #[must_use]
    pub fn is_full_row(&self, y: usize) -> bool {
        self.rows[y] == FULL_ROW
    }

    /// Returns true if cell `(x, y)` is occupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < GRID_WIDTH);
        self.rows[y] & (1 << x) != 0
    }

    /// Returns true if every row is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rows.iter().all(|&row| row == FULL_ROW)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Raw row masks, row 0 first.
    #[must_use]
    pub const fn rows(&self) -> &[u32; GRID_HEIGHT] {
        &self.rows
    }
}
