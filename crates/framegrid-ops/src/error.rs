//! Error types for grid composition.

use std::path::PathBuf;

use framegrid_core::{BackendError, Size, SizeMismatch};
use thiserror::Error;

/// Error raised while planning or composing a grid.
#[derive(Debug, Error)]
pub enum CompositionError {
    /// The frame sequence is empty.
    #[error("no frames to compose")]
    EmptyInput,

    /// The stack length is zero or exceeds the number of frames.
    #[error("invalid stack length {stack_length} for {frames} frames")]
    InvalidStackLength {
        /// Requested stack length
        stack_length: usize,
        /// Number of frames available
        frames: usize,
    },

    /// A frame differs in size from the first frame.
    #[error("frame {index} ({path}) is {actual}, expected {expected}")]
    NonUniformFrameSize {
        /// Position of the offending frame
        index: usize,
        /// Source file of the offending frame
        path: PathBuf,
        /// Size of the first frame
        expected: Size,
        /// Size of the offending frame
        actual: Size,
    },

    /// The scale percentage is not a positive finite number.
    #[error("invalid scale {0}%")]
    InvalidScale(f64),

    /// The backend failed, or returned geometry that contradicts the plan.
    #[error("backend failure: {0}")]
    BackendFailure(#[from] BackendError),
}

impl CompositionError {
    /// Creates a [`CompositionError::InvalidStackLength`] error.
    pub fn invalid_stack_length(stack_length: usize, frames: usize) -> Self {
        Self::InvalidStackLength {
            stack_length,
            frames,
        }
    }

    /// Reports bitmap geometry that differs from the planned geometry.
    pub fn unexpected_size(what: &str, expected: Size, actual: Size) -> Self {
        Self::BackendFailure(BackendError::invalid_dimensions(
            actual,
            format!("{what} should be {expected}"),
        ))
    }
}

impl From<SizeMismatch> for CompositionError {
    fn from(m: SizeMismatch) -> Self {
        Self::NonUniformFrameSize {
            index: m.index,
            path: m.path,
            expected: m.expected,
            actual: m.actual,
        }
    }
}

/// Result type for composition.
pub type CompositionResult<T> = Result<T, CompositionError>;
