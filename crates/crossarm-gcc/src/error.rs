//! Error types for the GCC adapter.

use std::path::PathBuf;

/// Errors that can occur while constructing toolchain commands.
#[derive(Debug, thiserror::Error)]
pub enum GccError {
    /// The requested image extension has no objcopy output format.
    #[error("unsupported image format '.{extension}' for {}: expected .bin or .hex", path.display())]
    UnsupportedImageFormat {
        /// The requested output image path.
        path: PathBuf,
        /// Its extension (may be empty).
        extension: String,
    },

    /// The response-file writer failed to persist an argument list.
    #[error("failed to write response file: {0}")]
    ResponseFile(#[from] std::io::Error),
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, GccError>;
