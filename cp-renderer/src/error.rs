//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while drawing or exporting the poster.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface could not provide a 2D context.
    #[error("2D context unavailable: {0}")]
    ContextUnavailable(String),

    /// A drawing call was rejected by the backend.
    #[error("Draw failed: {0}")]
    Draw(String),

    /// Serialising the surface to an image failed.
    #[error("Export failed: {0}")]
    Export(String),
}
