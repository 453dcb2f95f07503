//! Implementation of `sift stats`.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_index::{IndexStats, Term};

use crate::cli::{
    args::StatsCommand,
    context::CommandContext,
    output::{dim, print_json, subheader},
};

/// One row of the top-terms listing.
#[derive(Serialize)]
struct JsonTermFrequency<'a> {
    /// The term.
    term: &'a Term,
    /// Number of documents containing it.
    documents: usize,
}

/// JSON output for `sift stats`.
#[derive(Serialize)]
struct JsonStatsOutput<'a> {
    /// Index totals.
    #[serde(flatten)]
    stats: IndexStats,
    /// Most frequent terms by document frequency.
    top_terms: Vec<JsonTermFrequency<'a>>,
}

/// Prints index totals and the most frequent terms.
pub fn run(ctx: &mut CommandContext, cmd: &StatsCommand) -> ExitCode {
    let index = match ctx.index(0) {
        Ok(index) => index,
        Err(code) => return code,
    };
    let stats = index.stats();
    let top = index.top_terms(cmd.top);

    if cmd.output.json {
        return print_json(&JsonStatsOutput {
            stats,
            top_terms: top
                .into_iter()
                .map(|(term, documents)| JsonTermFrequency { term, documents })
                .collect(),
        });
    }

    println!("{}", subheader("Index:"));
    println!("   Documents:    {}", stats.documents);
    println!("   Terms:        {}", stats.vocabulary);
    println!("   Postings:     {}", stats.postings);
    println!("   Occurrences:  {}", stats.occurrences);
    println!();

    println!("{}", subheader("Top terms:"));
    if top.is_empty() {
        println!("   {}", dim("(none)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Term", "Documents", "Share"]);
    for (term, documents) in top {
        let share = documents as f64 / stats.documents.max(1) as f64 * 100.0;
        table.add_row(vec![
            Cell::new(term.as_str()),
            Cell::new(documents).set_alignment(CellAlignment::Right),
            Cell::new(format!("{share:.1}%")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}
