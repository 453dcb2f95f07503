//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into `Raw*` structures whose fields are all optional,
//! so that partial files can be merged field by field.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus section.
    pub corpus: Option<RawCorpusSettings>,
    /// Tokenizer section.
    pub tokenizer: Option<RawTokenizerSettings>,
    /// Index section.
    pub index: Option<RawIndexSettings>,
}

/// Raw `[corpus]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawCorpusSettings {
    /// Corpus directory, relative to the file that sets it.
    pub path: Option<String>,
    /// Include patterns. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
    /// Exclude patterns. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
}

/// Raw `[tokenizer]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTokenizerSettings {
    /// Lowercase terms before indexing.
    pub lowercase: Option<bool>,
    /// Index punctuation runs as terms.
    pub punctuation: Option<bool>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Build the index on the rayon thread pool.
    pub parallel: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.corpus.is_none());
        assert!(config.tokenizer.is_none());
        assert!(config.index.is_none());
    }

    #[test]
    fn full_config() {
        let config = parse(
            r#"
root = true

[corpus]
path = "texts"
include = ["**/*.txt", "**/*.text"]
exclude = ["drafts/**"]

[tokenizer]
lowercase = true
punctuation = false

[index]
parallel = true
"#,
        );

        assert_eq!(config.root, Some(true));
        let corpus = config.corpus.unwrap();
        assert_eq!(corpus.path.as_deref(), Some("texts"));
        assert_eq!(
            corpus.include,
            Some(vec!["**/*.txt".to_string(), "**/*.text".to_string()])
        );
        assert_eq!(corpus.exclude, Some(vec!["drafts/**".to_string()]));

        let tokenizer = config.tokenizer.unwrap();
        assert_eq!(tokenizer.lowercase, Some(true));
        assert_eq!(tokenizer.punctuation, Some(false));
        assert_eq!(config.index.unwrap().parallel, Some(true));
    }

    #[test]
    fn single_pattern_string() {
        let config = parse(
            r#"
[corpus]
include = "**/*.md"
"#,
        );
        let corpus = config.corpus.unwrap();
        assert_eq!(corpus.include, Some(vec!["**/*.md".to_string()]));
        assert!(corpus.exclude.is_none());
        assert!(corpus.path.is_none());
    }

    #[test]
    fn partial_tokenizer_section() {
        let config = parse("[tokenizer]\nlowercase = true\n");
        let tokenizer = config.tokenizer.unwrap();
        assert_eq!(tokenizer.lowercase, Some(true));
        assert!(tokenizer.punctuation.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_str("[corpus]\npaht = \"texts\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = parse_config_str("[index]\nparallel = \"yes\"\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = parse_config_file(Path::new("/nonexistent/sift/.sift.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
