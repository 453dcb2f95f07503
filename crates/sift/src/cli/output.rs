//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use serde::Serialize;
pub use sift_highlight::{dim, header, indent, rule, subheader, warning};
use sift_index::{DocumentId, PostingsSet};

/// Message printed when a query or term matches nothing.
pub const NO_MATCHES: &str = "No matching documents.";

/// JSON output for a single query's matches.
#[derive(Serialize)]
pub struct JsonQueryResults<'a> {
    /// The query as given on the command line.
    pub query: &'a str,
    /// Matching document ids in ascending order.
    pub matches: Vec<&'a DocumentId>,
    /// Number of matching documents.
    pub total: usize,
}

impl<'a> JsonQueryResults<'a> {
    /// Collects the matches of one query.
    pub fn new(query: &'a str, matches: Option<&'a PostingsSet>) -> Self {
        let matches: Vec<_> = matches.into_iter().flatten().collect();
        Self {
            query,
            total: matches.len(),
            matches,
        }
    }
}

/// JSON output for `sift search`.
#[derive(Serialize)]
pub struct JsonSearchOutput<'a> {
    /// Results grouped by query.
    pub queries: Vec<JsonQueryResults<'a>>,
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints document ids one per line, or the no-match message.
pub fn print_matches(matches: Option<&PostingsSet>) {
    match matches {
        Some(set) if !set.is_empty() => {
            for id in set {
                println!("{id}");
            }
        }
        _ => println!("{}", dim(NO_MATCHES)),
    }
}
