//! # Snake Kernel
//!
//! GPU side of Snake.
//!
//! This crate owns the wgpu pipeline that turns the bit-packed occupancy grid
//! into pixels:
//! - Uniform layout shared with the WGSL shader
//! - Fullscreen-triangle grid shader
//! - Validation helpers for debug builds
//!
//! Surface and device management live in the engine crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod render;
pub mod validation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::render::*;
    pub use crate::validation::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uniform_is_empty_board() {
        let uniform = GridUniform::default();
        assert_eq!(uniform.grid_width, 32);
        assert_eq!(uniform.grid_height, 32);
        assert!(uniform.rows.iter().all(|row| *row == 0));
    }
}
