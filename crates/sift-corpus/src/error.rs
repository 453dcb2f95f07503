//! Error types for corpus enumeration.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::DocumentId;

/// Errors raised while enumerating documents or reading their terms.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus root directory does not exist or is not a directory.
    #[error("corpus root not found: {0}")]
    RootNotFound(PathBuf),

    /// Failed to read a document from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the document that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A document's contents are not valid UTF-8.
    #[error("document is not valid UTF-8: {path}")]
    Decode {
        /// Path of the undecodable document.
        path: PathBuf,
    },

    /// A selected file's path is not valid UTF-8 and cannot be used as a document id.
    #[error("document path is not valid UTF-8: {path}")]
    PathNotUtf8 {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// Walking the corpus directory failed.
    #[error("failed to walk {path}: {message}")]
    Walk {
        /// Path at which the walk failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// An include or exclude glob did not compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// Terms were requested for a document the corpus does not contain.
    #[error("unknown document: {0}")]
    UnknownDocument(DocumentId),
}
