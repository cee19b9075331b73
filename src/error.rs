//! Error types shared by every filter in the crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors surfaced by filter operations.
///
/// All failures are synchronous and occur before any output is produced.
/// Near-zero denominators during spectral division are never surfaced here:
/// they are clamped internally to an epsilon floor.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// A filter received an image with the wrong number of channels,
    /// e.g. a grayscale-only frequency filter given an RGB buffer.
    #[error("expected an image with {expected} channel(s), got {actual}")]
    InvalidChannelCount { expected: usize, actual: usize },

    /// Two buffers that must share dimensions do not. The crate rejects
    /// mismatched inputs instead of silently resizing them.
    #[error("dimension mismatch: expected {expected:?} (height, width), got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A parameter failed validation before any computation started.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl FilterError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
