//! # Snake Gameplay
//!
//! Grid simulation for Snake.
//!
//! This crate holds everything that decides what happens on the board:
//! - Snake body and movement
//! - Buffered turn queue
//! - Bit-packed occupancy mask
//! - Food placement
//! - Fixed-timestep tick gate
//! - Key bindings and per-frame input
//! - The frame loop tying these together
//!
//! Nothing here touches a window or the GPU. Hosts feed input and time into
//! [`GameLoop::frame`] and receive the board through a [`RenderSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod direction;
pub mod food;
pub mod game_loop;
pub mod grid_mask;
pub mod input;
pub mod settings;
pub mod snake;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::*;
    pub use crate::direction::*;
    pub use crate::food::*;
    pub use crate::game_loop::*;
    pub use crate::grid_mask::*;
    pub use crate::input::*;
    pub use crate::settings::*;
    pub use crate::snake::*;
}

pub use prelude::*;
