//! Corpus access for sift.
//!
//! A corpus is the external collaborator that feeds the index builder: it names a set of
//! documents and yields the terms occurring in each one. This crate provides:
//!
//! - [`Term`] and [`DocumentId`], the typed keys every other crate shares
//! - the [`Corpus`] trait, the only interface the builder consumes
//! - [`MemoryCorpus`], an in-memory corpus for programmatic use and tests
//! - [`DirectoryCorpus`], a corpus backed by text files under a directory
//! - [`Tokenizer`], the word/punctuation splitter used for on-disk text
//!
//! # Example
//!
//! ```
//! use sift_corpus::{Corpus, MemoryCorpus};
//!
//! let corpus = MemoryCorpus::new()
//!     .with_document("docA", ["Paris", "Lear"])
//!     .with_document("docB", ["Paris", "France"]);
//!
//! assert_eq!(corpus.document_ids().unwrap().len(), 2);
//! ```

#![warn(missing_docs)]

mod corpus;
mod directory;
mod error;
mod id;
mod tokenizer;

pub use corpus::{Corpus, MemoryCorpus, Terms};
pub use directory::{DEFAULT_INCLUDE, DirectoryCorpus};
pub use error::CorpusError;
pub use id::{DocumentId, Term};
pub use tokenizer::Tokenizer;
