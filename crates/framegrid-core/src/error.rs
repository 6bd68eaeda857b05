//! Error types for image backend operations.
//!
//! Every [`ImageBackend`](crate::ImageBackend) primitive reports failures as a
//! [`BackendError`]. Higher layers wrap it: the frame loader into
//! `LoadError::DecodeFailure`, the grid composer into
//! `CompositionError::BackendFailure`, the output writer into
//! `WriteError::Encode`.
//!
//! # Usage
//!
//! ```rust
//! use framegrid_core::{BackendError, BackendResult, Size};
//!
//! fn check(size: Size) -> BackendResult<()> {
//!     if size.is_empty() {
//!         return Err(BackendError::invalid_dimensions(size, "zero-sized bitmap"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(Size::new(0, 10)).is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::rect::Size;

/// Result type alias using [`BackendError`] as the error type.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors raised by an image backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A file could not be decoded into a bitmap.
    #[error("failed to decode {path}: {reason}")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
        /// Backend-specific reason
        reason: String,
    },

    /// A bitmap could not be encoded to a file.
    #[error("failed to encode {path}: {reason}")]
    Encode {
        /// Destination file
        path: PathBuf,
        /// Backend-specific reason
        reason: String,
    },

    /// Dimensions are unusable for the requested operation.
    ///
    /// Returned for zero-sized results, sizes overflowing `u32`, or a paste
    /// that falls outside the target.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Offending width
        width: u32,
        /// Offending height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// An operation was asked of a backend that cannot perform it.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// I/O error while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// Creates a [`BackendError::Decode`] error.
    #[inline]
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a [`BackendError::Encode`] error.
    #[inline]
    pub fn encode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a [`BackendError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(size: Size, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width: size.width,
            height: size.height,
            reason: reason.into(),
        }
    }

    /// Creates a [`BackendError::Unsupported`] error.
    #[inline]
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }
}
