//! The inverted index.
//!
//! An [`InvertedIndex`] maps each term to the [`PostingsSet`] of documents containing it.
//! A term is a key if and only if it occurred in at least one document; looking up any
//! other term yields the empty set rather than an error.
//!
//! Indexes are only produced by the builder and expose no mutating methods, so a built
//! index can be shared across threads and queried concurrently without locking.

use std::{collections::HashMap, mem};

use serde::Serialize;
use sift_corpus::{DocumentId, Term};

use crate::PostingsSet;

/// Summary counts for an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of documents enumerated by the corpus.
    pub documents: usize,
    /// Number of distinct terms.
    pub vocabulary: usize,
    /// Total (term, document) pairs across all postings sets.
    pub postings: usize,
    /// Total term occurrences read, duplicates included.
    pub occurrences: u64,
}

/// A mapping from term to the set of documents containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    /// Postings for every term that occurred at least once.
    postings: HashMap<Term, PostingsSet>,
    /// Every document the corpus enumerated, including ones with no terms.
    documents: PostingsSet,
    /// Total term occurrences read during the build.
    occurrences: u64,
}

impl InvertedIndex {
    /// Returns a copy of the postings for `term`, or the empty set if it never occurred.
    ///
    /// The returned set is owned by the caller; changing it cannot affect the index.
    pub fn lookup(&self, term: &str) -> PostingsSet {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    /// Returns a shared view of the postings for `term`, if it occurred.
    pub fn postings(&self, term: &str) -> Option<&PostingsSet> {
        self.postings.get(term)
    }

    /// Returns true if `term` occurred in at least one document.
    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Returns the number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, PostingsSet::len)
    }

    /// Returns every indexed term in sorted order.
    pub fn terms(&self) -> Vec<&Term> {
        let mut terms: Vec<_> = self.postings.keys().collect();
        terms.sort();
        terms
    }

    /// Returns every document the corpus enumerated.
    pub fn documents(&self) -> &PostingsSet {
        &self.documents
    }

    /// Returns the number of documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Returns the number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns summary counts.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.documents.len(),
            vocabulary: self.postings.len(),
            postings: self.postings.values().map(PostingsSet::len).sum(),
            occurrences: self.occurrences,
        }
    }

    /// Returns the `limit` terms with the highest document frequency.
    ///
    /// Ties are broken by term order so the output is stable.
    pub fn top_terms(&self, limit: usize) -> Vec<(&Term, usize)> {
        let mut terms: Vec<_> = self
            .postings
            .iter()
            .map(|(term, postings)| (term, postings.len()))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(limit);
        terms
    }

    /// Records a document, returning false if it was already present.
    pub(crate) fn add_document(&mut self, id: DocumentId) -> bool {
        self.documents.insert(id)
    }

    /// Records one occurrence of `term` in document `id`.
    pub(crate) fn add_occurrence(&mut self, term: Term, id: &DocumentId) {
        self.occurrences += 1;
        self.postings.entry(term).or_default().insert(id.clone());
    }

    /// Combines two partial indexes by per-term union.
    ///
    /// Union is commutative and associative, so partial indexes may be merged in any order.
    pub(crate) fn merge(mut self, mut other: Self) -> Self {
        if other.postings.len() > self.postings.len() {
            mem::swap(&mut self, &mut other);
        }

        for (term, postings) in other.postings {
            self.postings.entry(term).or_default().absorb(postings);
        }
        self.documents.absorb(other.documents);
        self.occurrences += other.occurrences;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn index(docs: &[(&str, &[&str])]) -> InvertedIndex {
        let mut index = InvertedIndex::default();
        for (id, terms) in docs {
            let id = DocumentId::new(id);
            index.add_document(id.clone());
            for term in *terms {
                index.add_occurrence(Term::from(*term), &id);
            }
        }
        index
    }

    fn ids(set: &PostingsSet) -> Vec<&str> {
        set.iter().map(DocumentId::as_str).collect()
    }

    #[test]
    fn absent_term_is_empty_not_error() {
        let index = index(&[("docA", &["Paris"])]);
        assert!(index.lookup("nonexistent-term").is_empty());
        assert!(index.postings("nonexistent-term").is_none());
        assert!(!index.contains_term("nonexistent-term"));
        assert_eq!(index.document_frequency("nonexistent-term"), 0);
    }

    #[test]
    fn lookup_returns_independent_copy() {
        let index = index(&[("docA", &["Paris"]), ("docB", &["Paris"])]);
        let mut copy = index.lookup("Paris");
        copy.insert(DocumentId::new("docZ"));
        assert_eq!(ids(index.postings("Paris").unwrap()), vec!["docA", "docB"]);
    }

    #[test]
    fn keys_exist_only_for_occurring_terms() {
        let index = index(&[("docA", &["Lear", "Lear"]), ("empty", &[])]);
        assert_eq!(index.terms(), vec![&Term::from("Lear")]);
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.vocabulary_size(), 1);
    }

    #[test]
    fn terms_are_sorted() {
        let index = index(&[("d", &["b", "a", "C"])]);
        let terms: Vec<_> = index.terms().into_iter().map(Term::as_str).collect();
        assert_eq!(terms, vec!["C", "a", "b"]);
    }

    #[test]
    fn stats_count_occurrences_and_postings() {
        let index = index(&[
            ("docA", &["Paris", "Lear", "Paris"]),
            ("docB", &["Paris", "France"]),
        ]);
        assert_eq!(
            index.stats(),
            IndexStats {
                documents: 2,
                vocabulary: 3,
                postings: 4,
                occurrences: 5,
            }
        );
    }

    #[test]
    fn top_terms_by_document_frequency() {
        let index = index(&[
            ("docA", &["Paris", "Lear"]),
            ("docB", &["Paris", "France"]),
            ("docC", &["Lear"]),
        ]);
        let top: Vec<_> = index
            .top_terms(2)
            .into_iter()
            .map(|(t, n)| (t.as_str(), n))
            .collect();
        assert_eq!(top, vec![("Lear", 2), ("Paris", 2)]);
    }

    #[test]
    fn merge_is_per_term_union() {
        let left = index(&[("docA", &["Paris", "Lear"])]);
        let right = index(&[("docB", &["Paris", "France"]), ("docC", &["Lear"])]);
        let merged = left.clone().merge(right.clone());

        assert_eq!(ids(&merged.lookup("Paris")), vec!["docA", "docB"]);
        assert_eq!(ids(&merged.lookup("Lear")), vec!["docA", "docC"]);
        assert_eq!(merged.document_count(), 3);
        assert_eq!(merged, right.merge(left));
    }

    #[test]
    fn shared_across_threads() {
        let index = Arc::new(index(&[("docA", &["Paris"]), ("docB", &["Lear"])]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let index = Arc::clone(&index);
                thread::spawn(move || index.lookup("Paris"))
            })
            .collect();

        for handle in handles {
            assert_eq!(ids(&handle.join().unwrap()), vec!["docA"]);
        }
    }
}
