//! Inverted index construction and boolean query evaluation for sift.
//!
//! This crate provides the core engine:
//! - [`PostingsSet`]: the set of documents containing one term
//! - [`InvertedIndex`]: term → postings, built once from a [`Corpus`] and read-only after
//! - [`build`] / [`build_parallel`]: single-pass, all-or-nothing index construction
//! - [`evaluate`] / [`QueryEvaluator`]: set algebra over postings for AND, OR, AND NOT trees
//!
//! # Example
//!
//! ```
//! use sift_corpus::MemoryCorpus;
//! use sift_index::{QueryEvaluator, build};
//!
//! let corpus = MemoryCorpus::new()
//!     .with_document("docA", ["Paris", "Lear"])
//!     .with_document("docB", ["Paris", "France"])
//!     .with_document("docC", ["Lear"]);
//!
//! let index = build(&corpus).unwrap();
//! let hits = QueryEvaluator::new(&index)
//!     .search("(Paris AND NOT France) OR Lear")
//!     .unwrap()
//!     .unwrap();
//!
//! let ids: Vec<_> = hits.iter().map(|id| id.as_str()).collect();
//! assert_eq!(ids, vec!["docA", "docC"]);
//! ```

#![warn(missing_docs)]

mod builder;
mod error;
mod evaluate;
mod explain;
mod index;
mod postings;

pub use builder::{
    IndexBuilder, ProgressReporter, SilentReporter, build, build_parallel, build_with_reporter,
};
pub use error::IndexError;
pub use evaluate::{QueryEvaluator, evaluate};
pub use explain::Explanation;
pub use index::{IndexStats, InvertedIndex};
pub use postings::PostingsSet;
pub use sift_corpus::{Corpus, DocumentId, Term};
pub use sift_query::{MAX_DEPTH, QueryError, QueryExpr, RawQuery, parse as parse_query};
