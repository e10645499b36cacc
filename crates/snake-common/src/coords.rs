//! Grid coordinate type and board dimensions.

use std::ops::{Add, AddAssign};

/// Board width in cells.
pub const GRID_WIDTH: usize = 32;

/// Board height in cells.
pub const GRID_HEIGHT: usize = 32;

/// Total number of cells on the board.
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;

/// Grid coordinate.
///
/// Valid cells lie in `[0, GRID_WIDTH) x [0, GRID_HEIGHT)`. A cell may
/// transiently hold an out-of-range value after the snake leaves the board;
/// that is how a boundary violation is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Column, growing to the right
    pub x: i32,
    /// Row, growing upwards
    pub y: i32,
}

impl Cell {
    /// Creates a new cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates lie on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH as i32 && self.y >= 0 && self.y < GRID_HEIGHT as i32
    }

    /// Converts to linear index (row-major). Only meaningful for in-bounds cells.
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.y as usize) * GRID_WIDTH + (self.x as usize)
    }

    /// Creates from linear index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % GRID_WIDTH) as i32,
            y: (index / GRID_WIDTH) as i32,
        }
    }
}

impl Add for Cell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Cell {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
