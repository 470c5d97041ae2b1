//! Error types for color operations.
//!
//! Every failure carries the space id, format id or raw text needed to
//! diagnose it without inspecting the registry.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// The value passed where a color is expected is malformed.
    #[error("invalid color input: {0}")]
    InvalidColorInput(String),

    /// No space is registered with the given id or alias.
    #[error("unknown color space: {0}")]
    UnknownSpace(String),

    /// A space id or alias is already taken by another registered space.
    #[error("duplicate color space id or alias: {0}")]
    DuplicateSpace(String),

    /// The space graph has no route between the two spaces.
    #[error("no conversion path: {from} -> {to}")]
    NoConversionPath {
        /// Source color space.
        from: String,
        /// Target color space.
        to: String,
    },

    /// A custom format lacks the hook needed for the operation.
    #[error("format `{format}` does not support {operation}")]
    UnsupportedOperation {
        /// Id of the format.
        format: String,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// No registered format recognized the text.
    #[error("unrecognized color format: {0:?}")]
    UnrecognizedFormat(String),

    /// A gamut mapping method name could not be understood.
    #[error("unknown gamut mapping method: {0}")]
    UnknownGamutMethod(String),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
