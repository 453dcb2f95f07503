//! Postings sets.
//!
//! A [`PostingsSet`] is an ordered set of document ids. Ordering keeps results and their
//! serialized form deterministic. Every combining operation returns a fresh set and leaves
//! its inputs untouched.

use std::{
    collections::{BTreeSet, btree_set},
    mem,
};

use serde::{Deserialize, Serialize};
use sift_corpus::DocumentId;

/// The set of documents associated with one term, or the result of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingsSet(BTreeSet<DocumentId>);

impl PostingsSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no documents.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains the document.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Iterates over the documents in id order.
    pub fn iter(&self) -> btree_set::Iter<'_, DocumentId> {
        self.0.iter()
    }

    /// Returns the documents in either set.
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Returns the documents in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .iter()
            .filter(|id| large.0.contains(*id))
            .cloned()
            .collect()
    }

    /// Returns the documents in `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Returns true if every document in `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Returns the document ids as a sorted vector.
    pub fn into_vec(self) -> Vec<DocumentId> {
        self.0.into_iter().collect()
    }

    /// Adds a document, returning true if it was not already present.
    pub(crate) fn insert(&mut self, id: DocumentId) -> bool {
        self.0.insert(id)
    }

    /// Moves every document from `other` into `self`.
    pub(crate) fn absorb(&mut self, mut other: Self) {
        if other.len() > self.len() {
            mem::swap(self, &mut other);
        }
        self.0.append(&mut other.0);
    }
}

impl FromIterator<DocumentId> for PostingsSet {
    fn from_iter<I: IntoIterator<Item = DocumentId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for PostingsSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(DocumentId::new).collect()
    }
}

impl IntoIterator for PostingsSet {
    type Item = DocumentId;
    type IntoIter = btree_set::IntoIter<DocumentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PostingsSet {
    type Item = &'a DocumentId;
    type IntoIter = btree_set::Iter<'a, DocumentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> PostingsSet {
        ids.iter().copied().collect()
    }

    fn ids(set: &PostingsSet) -> Vec<&str> {
        set.iter().map(DocumentId::as_str).collect()
    }

    #[test]
    fn union_combines_both_sides() {
        let result = set(&["docA"]).union(&set(&["docA", "docC"]));
        assert_eq!(ids(&result), vec!["docA", "docC"]);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let lear = set(&["docB"]);
        assert_eq!(PostingsSet::new().union(&lear), lear);
        assert_eq!(lear.union(&PostingsSet::new()), lear);
    }

    #[test]
    fn intersection_keeps_common_documents() {
        let result = set(&["docA", "docB", "docC"]).intersection(&set(&["docC", "docA"]));
        assert_eq!(ids(&result), vec!["docA", "docC"]);
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = set(&["1", "2", "3", "4"]);
        let b = set(&["2", "4", "6"]);
        assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn difference_removes_right_side() {
        let paris = set(&["docA", "docB"]);
        let france = set(&["docB"]);
        assert_eq!(ids(&paris.difference(&france)), vec!["docA"]);
        assert!(france.difference(&paris).is_empty());
    }

    #[test]
    fn operations_leave_inputs_untouched() {
        let a = set(&["docA", "docB"]);
        let b = set(&["docB", "docC"]);
        let _ = a.union(&b);
        let _ = a.intersection(&b);
        let _ = a.difference(&b);
        assert_eq!(a, set(&["docA", "docB"]));
        assert_eq!(b, set(&["docB", "docC"]));
    }

    #[test]
    fn insert_has_set_semantics() {
        let mut postings = PostingsSet::new();
        assert!(postings.insert(DocumentId::new("docA")));
        assert!(!postings.insert(DocumentId::new("docA")));
        assert_eq!(postings.len(), 1);
        assert!(postings.contains("docA"));
        assert!(!postings.contains("docB"));
    }

    #[test]
    fn absorb_merges_sets() {
        let mut small = set(&["b"]);
        small.absorb(set(&["a", "c", "d"]));
        assert_eq!(ids(&small), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn subset() {
        assert!(set(&["a"]).is_subset(&set(&["a", "b"])));
        assert!(!set(&["a", "c"]).is_subset(&set(&["a", "b"])));
    }

    #[test]
    fn serializes_as_sorted_list() {
        let postings = set(&["docC", "docA"]);
        assert_eq!(
            serde_json::to_string(&postings).unwrap(),
            r#"["docA","docC"]"#
        );
    }
}
