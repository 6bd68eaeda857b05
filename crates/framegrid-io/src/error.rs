//! Error types for loading frames and writing composites.

use std::io;
use std::path::PathBuf;

use framegrid_core::BackendError;
use thiserror::Error;

/// Frame loading error.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input directory does not exist.
    #[error("input directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The input path exists but is not a directory.
    #[error("input is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A frame could not be decoded (only under the abort policy).
    #[error("failed to decode frame {path}: {source}")]
    DecodeFailure {
        /// Frame file
        path: PathBuf,
        /// Backend error
        source: BackendError,
    },

    /// The name filter is not a valid glob pattern.
    #[error("invalid frame pattern '{pattern}': {reason}")]
    Pattern {
        /// Pattern as given
        pattern: String,
        /// Parser message
        reason: String,
    },
}

/// Result type for frame loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Output writing error.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output directory could not be created or inspected.
    #[error("I/O error at {path}: {source}")]
    IoFailure {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The backend failed to encode the composite.
    #[error("failed to write {path}: {source}")]
    Encode {
        /// Destination file
        path: PathBuf,
        /// Backend error
        source: BackendError,
    },

    /// Every candidate name was already taken.
    #[error("output name collision: {path} exists ({attempts} alternatives tried)")]
    NameCollision {
        /// Originally requested path
        path: PathBuf,
        /// Number of suffixed names tried
        attempts: usize,
    },
}

/// Result type for output writing.
pub type WriteResult<T> = Result<T, WriteError>;
