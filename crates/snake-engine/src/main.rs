//! # Snake
//!
//! Classic Snake on a 32x32 grid, rendered with wgpu.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("snake=info".parse()?))
        .init();

    info!("Snake starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let score = snake_engine::app::run()?;

    match score {
        Some(score) => info!("Snake exited with score {score}"),
        None => info!("Snake shutdown complete"),
    }
    Ok(())
}
