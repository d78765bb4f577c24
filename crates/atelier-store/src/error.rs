//! Error taxonomy for the file access layer.

use std::io;

/// Failures surfaced by [`crate::FileService`].
///
/// Every variant names the offending path. Write failures keep the backend
/// error as their source and are split by content type so callers can
/// discriminate text from binary failures.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Path failed syntax validation, or (for writes) carries an
    /// unrecognized extension. Raised before any backend call.
    #[error("invalid file path \"{0}\"")]
    InvalidPath(String),

    /// File missing, unreadable, or a type mismatch during traversal.
    #[error("file \"{0}\" not found")]
    NotFound(String),

    /// Listing the directory failed.
    #[error("directory \"{0}\" not found")]
    DirectoryNotFound(String),

    /// Recursive creation of a missing ancestor directory failed.
    #[error("failed to create directory \"{path}\"")]
    DirectoryCreation {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Writing text content failed.
    #[error("failed to write text file \"{path}\"")]
    TextWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Writing binary content failed.
    #[error("failed to write binary file \"{path}\"")]
    BinaryWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}
