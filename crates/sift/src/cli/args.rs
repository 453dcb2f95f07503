//! Clap argument definitions for the `sift` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Boolean search over a directory of text documents")]
pub struct Cli {
    /// Corpus directory, overriding any configured path
    #[arg(long, global = true, value_name = "DIR")]
    pub corpus: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Queries to evaluate, each reported separately
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Treat each query as a JSON tree: a term string or {"op": ..., "args": [left, right]}
    #[arg(long)]
    pub raw: bool,

    /// Show the parsed query tree and per-node match counts
    #[arg(long)]
    pub explain: bool,

    /// Verbosity level (-v for a build summary, -vv for per-document progress)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift lookup`.
#[derive(Args, Debug, Clone)]
pub struct LookupCommand {
    /// Terms to look up, matched exactly
    #[arg(required = true)]
    pub terms: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    /// Number of most frequent terms to list
    #[arg(long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate boolean queries and print matching document ids
    #[command(after_help = "\
QUERY SYNTAX:
  term               Documents containing the term (exact, case-sensitive)
  a b                Both terms (implicit AND)
  a AND b            Both terms
  a OR b             Either term
  a AND NOT b        First term without the second
  \"King Lear\"        Quoted term, may contain spaces or keywords
  (expr)             Grouping

  AND NOT and implicit AND bind tighter than OR. Operators are uppercase;
  lowercase 'and', 'or' and 'not' are ordinary terms.

EXAMPLES:
  sift search Paris
  sift search '(Paris AND NOT France) OR Lear'
  sift search Paris Lear --json
  sift search --raw '{\"op\": \"or\", \"args\": [\"Paris\", \"Lear\"]}'")]
    Search(SearchCommand),

    /// Print the postings of individual terms
    Lookup(LookupCommand),

    /// Show index statistics and the most frequent terms
    Stats(StatsCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}
