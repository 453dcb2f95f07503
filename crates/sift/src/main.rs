//! Command-line interface for `sift`, a boolean search tool for directories of text.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `init` must work even when an existing config file is broken.
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load(cli.corpus.as_deref())
    };

    match ctx {
        Ok(mut ctx) => commands::run(cli.command, &mut ctx),
        Err(code) => code,
    }
}
