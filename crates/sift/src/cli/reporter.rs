//! Build progress on stderr.

use sift_index::{DocumentId, IndexStats, ProgressReporter};

use super::output::dim;

/// Reports index construction on stderr.
pub struct StderrReporter {
    /// 1 prints a summary once the build completes; 2 or more also prints each document.
    verbose: u8,
}

impl StderrReporter {
    /// Creates a reporter at the given verbosity.
    pub const fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    /// Prints the one-line build summary.
    pub fn summarize(&self, stats: &IndexStats) {
        eprintln!(
            "{}",
            dim(&format!(
                "indexed {} documents: {} terms, {} postings, {} occurrences",
                stats.documents, stats.vocabulary, stats.postings, stats.occurrences
            ))
        );
    }
}

impl ProgressReporter for StderrReporter {
    fn on_document_start(&mut self, id: &DocumentId, current: usize, total: usize) {
        if self.verbose > 1 {
            eprint!("{}", dim(&format!("[{current}/{total}] {id}")));
        }
    }

    fn on_document_done(&mut self, _id: &DocumentId, occurrences: usize) {
        if self.verbose > 1 {
            eprintln!("{}", dim(&format!(" ({occurrences} terms)")));
        }
    }

    fn on_complete(&mut self, stats: &IndexStats) {
        self.summarize(stats);
    }
}
