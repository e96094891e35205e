//! Backend error types

use crate::config::ConfigError;
use crate::gpu::GpuError;

/// Errors surfaced by the platform and renderer backends
///
/// Degenerate clip rectangles and stale texture handles are not errors; they
/// are skipped or substituted during translation.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    /// An operation was attempted on a backend object after disposal
    #[error("{0} used after disposal")]
    Disposed(&'static str),

    /// The GPU abstraction reported a failure
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
