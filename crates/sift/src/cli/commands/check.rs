//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::{ConfigWarning, discover_config_files, format_path_for_display};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Validates the configuration, printing warnings and hints.
///
/// Exits with failure when any warning is found.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = ctx.cwd.as_path();
    let config = &ctx.config;

    println!("{}", subheader("Config files:"));
    let files = discover_config_files(cwd);
    if files.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for path in &files {
        println!("   {}", format_path_for_display(path, Some(cwd)));
    }
    println!();

    println!("{}", subheader("Corpus:"));
    match &config.corpus.path {
        Some(path) => {
            let shown = format_path_for_display(path, Some(cwd));
            if path.is_dir() {
                println!("   {shown}");
            } else {
                println!("   {shown} {}", warning("[missing]"));
            }
        }
        None => println!("   {}", dim("(not configured)")),
    }
    for pattern in &config.corpus.include {
        println!("      + {pattern}");
    }
    for pattern in &config.corpus.exclude {
        println!("      - {pattern}");
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   - {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);
    ExitCode::FAILURE
}

/// Prints hints for resolving the given warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NoCorpusConfigured => {
                "Run 'sift init' and set [corpus] path, or pass --corpus <DIR>."
            }
            ConfigWarning::CorpusPathMissing { .. } => {
                "Create the corpus directory or update [corpus] path."
            }
            ConfigWarning::CorpusPathNotDirectory { .. } => {
                "The corpus path must point to a directory, not a file."
            }
            ConfigWarning::InvalidPattern { .. } => {
                "Fix the glob syntax; patterns are relative to the corpus directory."
            }
            ConfigWarning::IncludePatternMatchesNothing { .. } => {
                "Check that the include pattern matches files under the corpus directory."
            }
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    println!("{}", subheader("Hints:"));
    for hint in hints {
        println!("   - {hint}");
    }
}
