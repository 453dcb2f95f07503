//! Word and punctuation tokenizer for on-disk text.
//!
//! Splits text into maximal runs of word characters and maximal runs of other
//! non-whitespace characters, the classic `\w+|[^\w\s]+` word-punct split. Word runs are
//! always emitted; punctuation runs are emitted only when enabled.

use std::sync::LazyLock;

use regex::Regex;

use crate::Term;

/// Matches one word run (group 1) or one punctuation run (group 2).
static WORD_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)|([^\w\s]+)").expect("word-punct pattern is valid"));

/// Splits text into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    /// Lowercase every emitted term.
    pub lowercase: bool,
    /// Emit runs of punctuation as terms of their own.
    pub punctuation: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            lowercase: false,
            punctuation: true,
        }
    }
}

impl Tokenizer {
    /// Returns an iterator over the terms in `text`.
    pub fn terms(self, text: &str) -> impl Iterator<Item = Term> + '_ {
        let Self {
            lowercase,
            punctuation,
        } = self;

        WORD_PUNCT
            .captures_iter(text)
            .filter_map(move |caps| match (caps.get(1), caps.get(2)) {
                (Some(word), _) => Some(word.as_str()),
                (None, Some(punct)) if punctuation => Some(punct.as_str()),
                _ => None,
            })
            .map(move |run| {
                if lowercase {
                    Term::new(run.to_lowercase())
                } else {
                    Term::new(run)
                }
            })
    }

    /// Tokenizes `text` into a vector of terms.
    pub fn tokenize(self, text: &str) -> Vec<Term> {
        self.terms(text).collect()
    }
}
