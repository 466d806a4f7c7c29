use thiserror::Error;

/// Errors surfaced by the drawing surface and its collaborators.
///
/// Geometry never produces an error: out-of-bounds coordinates are dropped
/// and undo/redo at a history boundary simply return `None`.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Brush size {0} is outside 1..=50")]
    InvalidSize(u32),

    #[error("Invalid buffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Snapshot is {found:?} but the buffer is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Invalid font data: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}

/// Errors that can occur during interaction state transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
}

pub type CanvasResult<T> = Result<T, CanvasError>;
