//! Implementation of `sift search`.

use std::process::ExitCode;

use sift_index::{PostingsSet, QueryEvaluator, QueryExpr, RawQuery, parse_query};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{
        JsonQueryResults, JsonSearchOutput, dim, header, indent, print_json, print_matches,
        subheader,
    },
};

/// Evaluates each query against the corpus index and prints the matches.
///
/// Every query is parsed before the index is built, so a malformed query fails fast.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let mut parsed = Vec::with_capacity(cmd.queries.len());
    for query in &cmd.queries {
        match parse_or_failure(query, cmd.raw) {
            Ok(expr) => parsed.push((query.as_str(), expr)),
            Err(code) => return code,
        }
    }

    let index = match ctx.index(cmd.verbose) {
        Ok(index) => index,
        Err(code) => return code,
    };
    let evaluator = QueryEvaluator::new(index);

    if cmd.explain {
        for (query, expr) in &parsed {
            print_explanation(&evaluator, query, expr.as_ref());
        }
        return ExitCode::SUCCESS;
    }

    let results: Vec<(&str, Option<PostingsSet>)> = parsed
        .iter()
        .map(|(query, expr)| (*query, expr.as_ref().map(|e| evaluator.evaluate(e))))
        .collect();

    if cmd.output.json {
        let output = JsonSearchOutput {
            queries: results
                .iter()
                .map(|(query, matches)| JsonQueryResults::new(query, matches.as_ref()))
                .collect(),
        };
        return print_json(&output);
    }

    let labelled = results.len() > 1;
    for (i, (query, matches)) in results.iter().enumerate() {
        if labelled {
            if i > 0 {
                println!();
            }
            println!("{}", header(query));
        }
        print_matches(matches.as_ref());
        if cmd.verbose > 0 {
            let total = matches.as_ref().map_or(0, PostingsSet::len);
            println!("{}", dim(&format!("─── {total} documents ───")));
        }
    }

    ExitCode::SUCCESS
}

/// Parses one query from text or, with `raw`, from its JSON tree form.
///
/// Returns `None` for a text query with no terms.
fn parse_or_failure(query: &str, raw: bool) -> Result<Option<QueryExpr>, ExitCode> {
    let parsed = if raw {
        serde_json::from_str::<RawQuery>(query)
            .map_err(|e| format!("invalid JSON query: {e}"))
            .and_then(|raw| QueryExpr::try_from(raw).map_err(|e| e.to_string()))
            .map(Some)
    } else {
        parse_query(query).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| {
        eprintln!("error: {}", message.trim_end());
        ExitCode::FAILURE
    })
}

/// Prints the parsed tree and per-node match counts for one query.
fn print_explanation(evaluator: &QueryEvaluator<'_>, query: &str, expr: Option<&QueryExpr>) {
    println!("{}", subheader("Query:"));
    println!("   {query}");
    println!();

    let Some(expr) = expr else {
        println!("{}", dim("(empty query)"));
        println!();
        return;
    };

    println!("{}", subheader("Parsed AST:"));
    println!("{}", indent(&expr.to_string()));
    println!();

    println!("{}", subheader("Normalized:"));
    println!("   {}", expr.to_query_string());
    println!();

    println!("{}", subheader("Matches per node:"));
    println!("{}", indent(&evaluator.explain(expr).to_string()));
    println!();
}
