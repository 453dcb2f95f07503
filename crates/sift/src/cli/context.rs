//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{Config, TokenizerSettings};
use sift_corpus::{DirectoryCorpus, Tokenizer};
use sift_index::{InvertedIndex, SilentReporter, build_parallel, build_with_reporter};

use super::reporter::StderrReporter;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Index built for this invocation, on first use.
    index: Option<InvertedIndex>,
}

impl CommandContext {
    /// Loads the current directory and configuration, applying a `--corpus` override.
    pub fn load(corpus_override: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let mut config = load_config_or_failure(&cwd)?;
        if let Some(path) = corpus_override {
            config.corpus.path = Some(cwd.join(path));
        }
        Ok(Self {
            cwd,
            config,
            index: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            index: None,
        })
    }

    /// Returns the corpus index, building it on first use.
    ///
    /// `verbose` selects build diagnostics on stderr: 1 for a summary, 2 for every document.
    pub fn index(&mut self, verbose: u8) -> Result<&InvertedIndex, ExitCode> {
        let index = match self.index.take() {
            Some(index) => index,
            None => build_index_or_failure(&self.config, verbose)?,
        };
        Ok(self.index.insert(index))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Converts configured tokenizer settings.
fn tokenizer(settings: TokenizerSettings) -> Tokenizer {
    Tokenizer {
        lowercase: settings.lowercase,
        punctuation: settings.punctuation,
    }
}

/// Opens the configured corpus and builds its index, exiting with an error on failure.
fn build_index_or_failure(config: &Config, verbose: u8) -> Result<InvertedIndex, ExitCode> {
    let root = config.corpus_root().map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("Run 'sift init' to create a configuration file.");
        ExitCode::FAILURE
    })?;

    let corpus = DirectoryCorpus::with_patterns(root, &config.corpus.include, &config.corpus.exclude)
        .map_err(|e| {
            eprintln!("error: failed to open corpus: {e}");
            ExitCode::FAILURE
        })?
        .with_tokenizer(tokenizer(config.tokenizer));

    let result = if config.index.parallel {
        build_parallel(&corpus).inspect(|index| {
            if verbose > 0 {
                StderrReporter::new(verbose).summarize(&index.stats());
            }
        })
    } else if verbose > 0 {
        build_with_reporter(&corpus, &mut StderrReporter::new(verbose))
    } else {
        build_with_reporter(&corpus, &mut SilentReporter)
    };

    result.map_err(|e| {
        eprintln!("error: indexing failed: {e}");
        ExitCode::FAILURE
    })
}
