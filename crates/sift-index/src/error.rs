//! Error types for the sift-index crate.

use sift_corpus::{CorpusError, DocumentId};
use thiserror::Error;

/// Errors that can occur while building an index.
///
/// A failed build never yields a partial index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The corpus failed to enumerate documents or terms.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The corpus listed the same document id more than once.
    #[error("duplicate document id: {0}")]
    DuplicateDocument(DocumentId),
}
