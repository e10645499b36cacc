//! Snake Engine - windowing, rendering and frame pacing for Snake.
//!
//! This crate hosts the gameplay loop inside a winit event loop and presents
//! the board through wgpu.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod input;
pub mod renderer;
pub mod timing;
