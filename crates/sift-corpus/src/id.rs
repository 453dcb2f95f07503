//! Typed terms and document identifiers.
//!
//! Both are opaque: equality, ordering, and hashing are those of the underlying string, with
//! no case folding or other normalization.

use std::{borrow::Borrow, fmt, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single token yielded by a corpus, used verbatim as an index key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    /// Creates a term from any string-like value.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the term text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the term is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names one document within a corpus.
///
/// Backed by a shared string so the same id can sit in many postings sets cheaply.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    /// Creates a document id from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[test]
    fn terms_are_case_sensitive() {
        assert_ne!(Term::from("Paris"), Term::from("paris"));
    }

    #[test]
    fn term_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Term::from("Lear"), 1);
        assert_eq!(map.get("Lear"), Some(&1));
        assert_eq!(map.get("lear"), None);
    }

    #[test]
    fn document_ids_compare_by_text() {
        let a = DocumentId::new("austen-emma.txt");
        let b = DocumentId::from(String::from("austen-emma.txt"));
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn document_id_ordering() {
        let mut ids = vec![DocumentId::new("docC"), DocumentId::new("docA")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "docA");
    }
}
