//! Food placement by rejection sampling over the occupancy mask.

use fastrand::Rng;
use snake_common::{Cell, GRID_HEIGHT, GRID_WIDTH};
use tracing::debug;

use crate::grid_mask::GridMask;

/// Picks a free cell for the next piece of food.
///
/// Draws random rows until one is not full, then random columns within that
/// row until one is free. Returns `None` only when the board is full, in
/// which case there is nowhere left to put food.
pub fn place_food(rng: &mut Rng, mask: &GridMask) -> Option<Cell> {
    if mask.is_full() {
        return None;
    }

    let y = loop {
        let y = rng.usize(0..GRID_HEIGHT);
        if !mask.is_full_row(y) {
            break y;
        }
    };

    let x = loop {
        let x = rng.usize(0..GRID_WIDTH);
        if !mask.is_occupied(x, y) {
            break x;
        }
    };

    let food = Cell::new(x as i32, y as i32);
    debug!("Placed food at ({}, {})", food.x, food.y);
    Some(food)
}
