/// Convenience result type used across the canvas crate.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors raised by fallible construction and configuration APIs.
///
/// Recording itself never fails: degenerate draw calls are no-ops and invariant violations are
/// debug assertions. This type only covers inputs that are validated up front.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// Invalid user-provided data (sigma, pixel buffers, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
