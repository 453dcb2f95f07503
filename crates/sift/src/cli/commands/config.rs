//! Implementation of `sift config`.

use std::process::ExitCode;

use sift_config::{discover_config_files, format_path_for_display};
use sift_highlight::TomlHighlighter;

use crate::cli::{
    context::CommandContext,
    output::{dim, rule, subheader},
};

/// Shows the config files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);

    println!("{}", subheader("Config files (highest precedence first):"));
    if files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &files {
        println!("   {}", format_path_for_display(path, Some(ctx.cwd.as_path())));
    }
    println!();

    let settings = match ctx.config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", subheader("Effective settings:"));
    println!("{}", rule(40));
    print!("{}", TomlHighlighter::new().highlight(&settings));
    println!("{}", rule(40));

    ExitCode::SUCCESS
}
