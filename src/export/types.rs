//! Error types for image export.

use thiserror::Error;

/// Errors that can occur while exporting the drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering failed: {0}")]
    Render(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Surface(String),

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid export size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}
