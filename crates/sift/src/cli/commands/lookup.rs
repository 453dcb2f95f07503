//! Implementation of `sift lookup`.

use std::process::ExitCode;

use serde::Serialize;
use sift_index::DocumentId;

use crate::cli::{
    args::LookupCommand,
    context::CommandContext,
    output::{header, print_json, print_matches},
};

/// JSON output for one term.
#[derive(Serialize)]
struct JsonTermPostings<'a> {
    /// The term as given.
    term: &'a str,
    /// Documents containing the term.
    documents: Vec<&'a DocumentId>,
    /// Number of documents containing the term.
    total: usize,
}

/// JSON output for `sift lookup`.
#[derive(Serialize)]
struct JsonLookupOutput<'a> {
    /// Postings per term, in argument order.
    terms: Vec<JsonTermPostings<'a>>,
}

/// Prints the postings of each requested term.
pub fn run(ctx: &mut CommandContext, cmd: &LookupCommand) -> ExitCode {
    let index = match ctx.index(0) {
        Ok(index) => index,
        Err(code) => return code,
    };

    if cmd.output.json {
        let terms = cmd
            .terms
            .iter()
            .map(|term| {
                let documents: Vec<_> = index.postings(term).into_iter().flatten().collect();
                JsonTermPostings {
                    term,
                    total: documents.len(),
                    documents,
                }
            })
            .collect();
        return print_json(&JsonLookupOutput { terms });
    }

    for (i, term) in cmd.terms.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", header(term));
        print_matches(index.postings(term));
    }

    ExitCode::SUCCESS
}
