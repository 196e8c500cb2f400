//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while capturing or exporting a composition.
///
/// Every variant aborts the export it occurred in; nothing partial is
/// returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Another export is still running.
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Rasterizing the composition failed.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// A target canvas could not be allocated.
    #[error("Failed to allocate {width}x{height} canvas")]
    Canvas {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Encoding a variant failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Packaging the archive failed.
    #[error("Archive packaging failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Writing the archive failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
