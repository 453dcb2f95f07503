//! Index construction.
//!
//! The [`IndexBuilder`] makes a single pass over a corpus:
//! 1. Enumerate document ids, rejecting duplicates
//! 2. Record every document, including ones that yield no terms
//! 3. For each (document, term) occurrence, add the document to the term's postings
//!
//! The build is all-or-nothing: the first corpus error aborts it and the partially filled
//! index is dropped. Because each step is a set insertion, the result does not depend on
//! the order documents or terms arrive in.

use std::collections::HashSet;

use rayon::prelude::*;
use sift_corpus::{Corpus, DocumentId};

use crate::{IndexError, IndexStats, InvertedIndex};

/// Callback for reporting build progress.
pub trait ProgressReporter {
    /// Called when starting to read a document.
    fn on_document_start(&mut self, id: &DocumentId, current: usize, total: usize);

    /// Called when a document has been fully read.
    fn on_document_done(&mut self, id: &DocumentId, occurrences: usize);

    /// Called when the build is complete.
    fn on_complete(&mut self, stats: &IndexStats);
}

/// A no-op progress reporter for silent builds.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_document_start(&mut self, _id: &DocumentId, _current: usize, _total: usize) {}
    fn on_document_done(&mut self, _id: &DocumentId, _occurrences: usize) {}
    fn on_complete(&mut self, _stats: &IndexStats) {}
}

/// Builds an [`InvertedIndex`] from a corpus.
pub struct IndexBuilder<'a, C: ?Sized> {
    /// The corpus to read.
    corpus: &'a C,
}

impl<'a, C: Corpus + ?Sized> IndexBuilder<'a, C> {
    /// Creates a builder over the given corpus.
    pub fn new(corpus: &'a C) -> Self {
        Self { corpus }
    }

    /// Builds the index on the current thread, reporting progress per document.
    pub fn build<R: ProgressReporter>(&self, reporter: &mut R) -> Result<InvertedIndex, IndexError> {
        let ids = self.document_ids()?;
        let total = ids.len();
        let mut index = InvertedIndex::default();

        for (idx, id) in ids.into_iter().enumerate() {
            reporter.on_document_start(&id, idx + 1, total);
            let occurrences = self.index_document(&mut index, id.clone())?;
            reporter.on_document_done(&id, occurrences);
        }

        reporter.on_complete(&index.stats());
        Ok(index)
    }

    /// Builds the index across the rayon thread pool.
    ///
    /// Each worker fills a private partial index; partial indexes are merged by per-term
    /// union. The result equals [`build`](Self::build) on the same corpus.
    pub fn build_parallel(&self) -> Result<InvertedIndex, IndexError>
    where
        C: Sync,
    {
        let ids = self.document_ids()?;

        ids.into_par_iter()
            .try_fold(InvertedIndex::default, |mut index, id| {
                self.index_document(&mut index, id)?;
                Ok::<_, IndexError>(index)
            })
            .try_reduce(InvertedIndex::default, |left, right| Ok(left.merge(right)))
    }

    /// Enumerates document ids, rejecting duplicates.
    fn document_ids(&self) -> Result<Vec<DocumentId>, IndexError> {
        let ids = self.corpus.document_ids()?;

        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id) {
                return Err(IndexError::DuplicateDocument(id.clone()));
            }
        }

        Ok(ids)
    }

    /// Reads one document into `index`, returning the number of occurrences read.
    fn index_document(&self, index: &mut InvertedIndex, id: DocumentId) -> Result<usize, IndexError> {
        let terms = self.corpus.terms_of(&id)?;
        let mut occurrences = 0;

        for term in terms {
            index.add_occurrence(term?, &id);
            occurrences += 1;
        }

        index.add_document(id);
        Ok(occurrences)
    }
}

/// Builds an index from `corpus` on the current thread.
pub fn build<C: Corpus + ?Sized>(corpus: &C) -> Result<InvertedIndex, IndexError> {
    IndexBuilder::new(corpus).build(&mut SilentReporter)
}

/// Builds an index from `corpus` on the current thread, reporting progress to `reporter`.
pub fn build_with_reporter<C, R>(corpus: &C, reporter: &mut R) -> Result<InvertedIndex, IndexError>
where
    C: Corpus + ?Sized,
    R: ProgressReporter,
{
    IndexBuilder::new(corpus).build(reporter)
}

/// Builds an index from `corpus` across the rayon thread pool.
pub fn build_parallel<C: Corpus + Sync + ?Sized>(corpus: &C) -> Result<InvertedIndex, IndexError> {
    IndexBuilder::new(corpus).build_parallel()
}
