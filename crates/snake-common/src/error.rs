//! Error types for Snake.
//!
//! The simulation core has no failure modes; these cover the platform
//! boundary only.

use thiserror::Error;

/// GPU-specific errors.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to initialize GPU
    #[error("GPU initialization failed: {0}")]
    InitFailed(String),

    /// Shader compilation error
    #[error("Shader compilation failed: {0}")]
    ShaderError(String),

    /// Surface could not provide a frame
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type alias for GPU operations.
pub type GpuResult<T> = Result<T, GpuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GpuError::Surface("timeout".to_string());
        assert_eq!(err.to_string(), "Surface error: timeout");

        let err = GpuError::InitFailed("no adapter".to_string());
        assert!(err.to_string().contains("no adapter"));
    }
}
