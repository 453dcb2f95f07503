//! The corpus collaborator interface and an in-memory implementation.

use std::collections::BTreeMap;

use crate::{CorpusError, DocumentId, Term};

/// A lazily produced sequence of terms for one document.
///
/// Each item may fail independently, so a corpus can surface read or decode errors
/// partway through a document.
pub type Terms<'a> = Box<dyn Iterator<Item = Result<Term, CorpusError>> + 'a>;

/// A source of documents and their terms.
///
/// Implementations enumerate their document ids once and then yield the terms of each
/// document on request. Terms may repeat and may arrive in any order. Callers only ever
/// hold a shared reference, so a corpus is never mutated by indexing.
pub trait Corpus {
    /// Returns the ids of every document in the corpus.
    fn document_ids(&self) -> Result<Vec<DocumentId>, CorpusError>;

    /// Returns the terms occurring in the given document.
    fn terms_of(&self, id: &DocumentId) -> Result<Terms<'_>, CorpusError>;
}

impl<C: Corpus + ?Sized> Corpus for &C {
    fn document_ids(&self) -> Result<Vec<DocumentId>, CorpusError> {
        (**self).document_ids()
    }

    fn terms_of(&self, id: &DocumentId) -> Result<Terms<'_>, CorpusError> {
        (**self).terms_of(id)
    }
}

/// A corpus held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCorpus {
    /// Terms of each document, keyed by id.
    documents: BTreeMap<DocumentId, Vec<Term>>,
}

impl MemoryCorpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, returning the corpus for chaining.
    pub fn with_document<I, T>(mut self, id: impl Into<DocumentId>, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.insert(id, terms);
        self
    }

    /// Adds or replaces a document.
    pub fn insert<I, T>(&mut self, id: impl Into<DocumentId>, terms: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.documents
            .insert(id.into(), terms.into_iter().map(Into::into).collect());
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Corpus for MemoryCorpus {
    fn document_ids(&self) -> Result<Vec<DocumentId>, CorpusError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn terms_of(&self, id: &DocumentId) -> Result<Terms<'_>, CorpusError> {
        let terms = self
            .documents
            .get(id)
            .ok_or_else(|| CorpusError::UnknownDocument(id.clone()))?;
        Ok(Box::new(terms.iter().cloned().map(Ok)))
    }
}
