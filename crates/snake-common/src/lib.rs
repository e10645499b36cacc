//! # Snake Common
//!
//! Common types shared by the Snake crates:
//! - Grid dimensions and the `Cell` coordinate type
//! - Error types for the GPU boundary
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(GRID_WIDTH, 32);
        assert_eq!(GRID_HEIGHT, 32);
        assert_eq!(GRID_CELLS, 1024);
        // One u32 mask per row must cover every column
        assert_eq!(GRID_WIDTH as u32, u32::BITS);
    }

    #[test]
    fn test_cell_translation() {
        let cell = Cell::new(0, 3) + Cell::new(0, 1);
        assert_eq!(cell, Cell::new(0, 4));
        assert!(cell.in_bounds());
    }
}
