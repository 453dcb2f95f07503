//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::{fmt, fs, path::Path};

use globset::{Glob, GlobMatcher};

use crate::{CONFIG_FILENAME, Config};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No corpus directory is configured.
    NoCorpusConfigured,
    /// The corpus path does not exist.
    CorpusPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The corpus path exists but is not a directory.
    CorpusPathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// A pattern is not a valid glob.
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        message: String,
    },
    /// An include pattern doesn't match any files.
    IncludePatternMatchesNothing {
        /// Pattern that matched nothing.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCorpusConfigured => {
                write!(f, "no corpus path is configured in any {CONFIG_FILENAME}")
            }
            Self::CorpusPathMissing { path } => write!(f, "corpus path does not exist: {path}"),
            Self::CorpusPathNotDirectory { path } => {
                write!(f, "corpus path is not a directory: {path}")
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid glob pattern '{pattern}': {message}")
            }
            Self::IncludePatternMatchesNothing { pattern } => {
                write!(f, "include pattern '{pattern}' matches no files")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for pattern in &config.corpus.exclude {
        if let Err(err) = Glob::new(pattern) {
            warnings.push(ConfigWarning::InvalidPattern {
                pattern: pattern.clone(),
                message: err.kind().to_string(),
            });
        }
    }

    let Some(root) = &config.corpus.path else {
        warnings.push(ConfigWarning::NoCorpusConfigured);
        return warnings;
    };

    if !root.exists() {
        warnings.push(ConfigWarning::CorpusPathMissing {
            path: root.display().to_string(),
        });
        return warnings;
    }

    if !root.is_dir() {
        warnings.push(ConfigWarning::CorpusPathNotDirectory {
            path: root.display().to_string(),
        });
        return warnings;
    }

    for pattern in &config.corpus.include {
        match Glob::new(pattern) {
            Err(err) => warnings.push(ConfigWarning::InvalidPattern {
                pattern: pattern.clone(),
                message: err.kind().to_string(),
            }),
            Ok(glob) => {
                if !walk_and_match(root, root, &glob.compile_matcher()) {
                    warnings.push(ConfigWarning::IncludePatternMatchesNothing {
                        pattern: pattern.clone(),
                    });
                }
            }
        }
    }

    warnings
}

/// Recursively walks a directory and checks if any file matches the pattern.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobMatcher) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    entries.flatten().any(|entry| {
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        (path.is_file() && matcher.is_match(relative))
            || (path.is_dir() && walk_and_match(root, &path, matcher))
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_support::TestDir;

    fn config_for(path: PathBuf, include: &[&str]) -> Config {
        let mut config = Config::default();
        config.corpus.path = Some(path);
        config.corpus.include = include.iter().map(|p| p.to_string()).collect();
        config
    }

    #[test]
    fn unconfigured_corpus() {
        assert_eq!(
            Config::default().validate(),
            vec![ConfigWarning::NoCorpusConfigured]
        );
    }

    #[test]
    fn missing_corpus_path() {
        let config = config_for(PathBuf::from("/nonexistent/sift/12345"), &["**/*.txt"]);
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ConfigWarning::CorpusPathMissing { .. }));
    }

    #[test]
    fn corpus_path_is_a_file() {
        let dir = TestDir::new();
        let file = dir.create_file("texts", "not a directory");
        let warnings = config_for(file, &["**/*.txt"]).validate();
        assert!(matches!(warnings[0], ConfigWarning::CorpusPathNotDirectory { .. }));
    }

    #[test]
    fn pattern_matching_nothing() {
        let dir = TestDir::new();
        dir.create_file("texts/a.txt", "Paris");
        let root = dir.path().join("texts");

        let warnings = config_for(root, &["**/*.txt", "**/*.md"]).validate();
        assert_eq!(
            warnings,
            vec![ConfigWarning::IncludePatternMatchesNothing {
                pattern: "**/*.md".into()
            }]
        );
    }

    #[test]
    fn nested_matches_count() {
        let dir = TestDir::new();
        dir.create_file("texts/deep/er/a.txt", "Lear");
        assert!(config_for(dir.path().join("texts"), &["**/*.txt"]).validate().is_empty());
    }

    #[test]
    fn invalid_patterns() {
        let dir = TestDir::new();
        dir.create_file("texts/a.txt", "Lear");
        let mut config = config_for(dir.path().join("texts"), &["a[.txt"]);
        config.corpus.exclude = vec!["{unclosed".into()];

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(
            warnings
                .iter()
                .all(|w| matches!(w, ConfigWarning::InvalidPattern { .. }))
        );
    }

    #[test]
    fn warning_messages() {
        let warning = ConfigWarning::IncludePatternMatchesNothing {
            pattern: "**/*.md".into(),
        };
        assert_eq!(warning.to_string(), "include pattern '**/*.md' matches no files");
        assert!(
            ConfigWarning::NoCorpusConfigured
                .to_string()
                .contains(".sift.toml")
        );
    }
}
