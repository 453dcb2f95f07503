//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence.
//!
//! ```toml
//! [corpus]
//! path = "texts"
//! include = ["**/*.txt"]
//!
//! [tokenizer]
//! lowercase = false
//! ```

#![warn(missing_docs)]

mod discovery;
mod display;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use display::format_path_for_display;
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawCorpusSettings, RawIndexSettings, RawTokenizerSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use sift_corpus::DEFAULT_INCLUDE;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Which files make up the corpus.
    pub corpus: CorpusSettings,
    /// How document text is split into terms.
    pub tokenizer: TokenizerSettings,
    /// How the index is built.
    pub index: IndexSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// 1. Discovers all `.sift.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.sift.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them, closest to `cwd` winning
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Loads configuration from a list of config file paths, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the configured corpus directory.
    pub fn corpus_root(&self) -> Result<&Path, ConfigError> {
        self.corpus
            .path
            .as_deref()
            .ok_or(ConfigError::NoCorpus {
                filename: CONFIG_FILENAME,
            })
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - No corpus directory configured
    /// - A corpus path that doesn't exist or isn't a directory
    /// - Include and exclude patterns that are not valid globs
    /// - Include patterns that don't match any files
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.sift.toml` format.
    ///
    /// Fails if a setting cannot be written as TOML, such as a non-UTF-8 corpus path.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            corpus: &self.corpus,
            tokenizer: &self.tokenizer,
            index: &self.index,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings for the `[corpus]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Resolved corpus directory, if one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Glob patterns selecting document files, relative to the corpus root.
    pub include: Vec<String>,
    /// Glob patterns removing files from the selection.
    pub exclude: Vec<String>,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            path: None,
            include: vec![DEFAULT_INCLUDE.to_string()],
            exclude: Vec::new(),
        }
    }
}

/// Settings for the `[tokenizer]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenizerSettings {
    /// Lowercase terms before indexing. Off by default: matching is case-sensitive.
    pub lowercase: bool,
    /// Index runs of punctuation as terms of their own.
    pub punctuation: bool,
}

impl Default for TokenizerSettings {
    fn default() -> Self {
        Self {
            lowercase: false,
            punctuation: true,
        }
    }
}

/// Settings for the `[index]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Build the index across all cores.
    pub parallel: bool,
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Corpus settings.
    corpus: &'a CorpusSettings,
    /// Tokenizer settings.
    tokenizer: &'a TokenizerSettings,
    /// Index settings.
    index: &'a IndexSettings,
}
