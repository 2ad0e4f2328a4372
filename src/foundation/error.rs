/// Convenience result type used across holocam.
pub type HolocamResult<T> = Result<T, HolocamError>;

/// Error taxonomy returned by every frame-generation API.
///
/// Failures are permanent for a given call's inputs; nothing is retried internally.
#[derive(thiserror::Error, Debug)]
pub enum HolocamError {
    /// Missing buffer, zero dimension, or otherwise structurally invalid parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Pixel subtype outside the supported set.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Declared buffer length is too small for the requested geometry.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// A scratch buffer could not be obtained.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// Source asset could not be read from disk.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HolocamError {
    /// Build a [`HolocamError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`HolocamError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`HolocamError::SizeMismatch`] value.
    pub fn size_mismatch(msg: impl Into<String>) -> Self {
        Self::SizeMismatch(msg.into())
    }

    /// Build a [`HolocamError::AllocationFailure`] value.
    pub fn allocation_failure(msg: impl Into<String>) -> Self {
        Self::AllocationFailure(msg.into())
    }

    /// Build a [`HolocamError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
