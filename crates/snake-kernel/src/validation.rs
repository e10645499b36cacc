//! GPU validation helpers.
//!
//! wgpu validation is switched on for debug builds. Pipeline creation is
//! wrapped in an error scope so a bad shader surfaces as a [`GpuError`]
//! instead of an uncaptured device error.

use snake_common::{GpuError, GpuResult};
use tracing::{error, info};

/// Returns wgpu instance flags with validation enabled for debug builds.
#[must_use]
pub fn gpu_instance_flags() -> wgpu::InstanceFlags {
    if cfg!(debug_assertions) {
        info!("GPU validation layer enabled (debug build)");
        wgpu::InstanceFlags::VALIDATION | wgpu::InstanceFlags::DEBUG
    } else {
        wgpu::InstanceFlags::empty()
    }
}

/// Creates a wgpu instance with the validation flags above.
#[must_use]
pub fn create_validated_instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        flags: gpu_instance_flags(),
        ..Default::default()
    })
}

/// Handles wgpu device errors by logging them.
///
/// Use this with `device.on_uncaptured_error()`.
pub fn handle_device_error(error: &wgpu::Error) {
    error!("GPU device error: {error}");
}

/// Runs `build` inside a validation error scope.
///
/// Any validation error raised while `build` runs (shader compilation,
/// layout mismatch) is returned as [`GpuError::ShaderError`].
pub async fn with_validation<T>(
    device: &wgpu::Device,
    build: impl FnOnce(&wgpu::Device) -> T,
) -> GpuResult<T> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build(device);
    match device.pop_error_scope().await {
        None => Ok(value),
        Some(err) => {
            error!("Pipeline validation failed: {err}");
            Err(GpuError::ShaderError(err.to_string()))
        },
    }
}
