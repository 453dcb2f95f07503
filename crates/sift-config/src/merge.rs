//! Configuration merging.
//!
//! Merges parsed `.sift.toml` files into a single `Config`. Every field is merged
//! independently: the file closest to the working directory that sets a field wins.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, CorpusSettings, IndexSettings, TokenizerSettings,
    parse::{RawConfig, RawCorpusSettings, RawIndexSettings, RawTokenizerSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file, against which relative paths resolve.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files given in precedence order, highest first.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut corpus = CorpusSettings::default();
    let mut tokenizer = TokenizerSettings::default();
    let mut index = IndexSettings::default();

    // Lowest precedence first, so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.corpus {
            apply_raw_corpus(&mut corpus, raw, parsed.dir())?;
        }
        if let Some(raw) = &parsed.config.tokenizer {
            apply_raw_tokenizer(&mut tokenizer, raw);
        }
        if let Some(raw) = &parsed.config.index {
            apply_raw_index(&mut index, raw);
        }
    }

    Ok(Config {
        corpus,
        tokenizer,
        index,
        config_root: configs.first().map(|c| c.dir().to_path_buf()),
    })
}

/// Applies a raw `[corpus]` section, resolving its path against `config_dir`.
fn apply_raw_corpus(
    result: &mut CorpusSettings,
    raw: &RawCorpusSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(path) = &raw.path {
        result.path = Some(resolve_path(path, config_dir)?);
    }
    if let Some(include) = &raw.include {
        result.include.clone_from(include);
    }
    if let Some(exclude) = &raw.exclude {
        result.exclude.clone_from(exclude);
    }
    Ok(())
}

/// Applies a raw `[tokenizer]` section.
fn apply_raw_tokenizer(result: &mut TokenizerSettings, raw: &RawTokenizerSettings) {
    if let Some(v) = raw.lowercase {
        result.lowercase = v;
    }
    if let Some(v) = raw.punctuation {
        result.punctuation = v;
    }
}

/// Applies a raw `[index]` section.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(v) = raw.parallel {
        result.parallel = v;
    }
}
