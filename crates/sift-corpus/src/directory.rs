//! A corpus backed by text files under a directory.
//!
//! Walks the root directory, keeping regular files that match at least one include pattern
//! and no exclude pattern. Hidden entries and symlinks are skipped. Each file is one
//! document, named by its root-relative path with `/` separators. A selected file whose
//! path is not valid UTF-8 fails enumeration, since its id could not name it again.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::{Corpus, CorpusError, DocumentId, Terms, Tokenizer};

/// Include pattern used when none is given.
pub const DEFAULT_INCLUDE: &str = "**/*.txt";

/// A corpus of text files under one root directory.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    /// Root directory of the corpus.
    root: PathBuf,
    /// Files to include (relative to the root).
    include: GlobSet,
    /// Files to exclude (relative to the root).
    exclude: GlobSet,
    /// Tokenizer applied to each file's text.
    tokenizer: Tokenizer,
}

impl DirectoryCorpus {
    /// Opens a corpus rooted at `root` with the default include pattern.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CorpusError> {
        Self::with_patterns(root, &[DEFAULT_INCLUDE.to_string()], &[])
    }

    /// Opens a corpus rooted at `root` with explicit include and exclude patterns.
    ///
    /// An empty include list falls back to [`DEFAULT_INCLUDE`].
    pub fn with_patterns(
        root: impl Into<PathBuf>,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self, CorpusError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CorpusError::RootNotFound(root));
        }

        let include = if include.is_empty() {
            compile_set(&[DEFAULT_INCLUDE.to_string()])?
        } else {
            compile_set(include)?
        };

        Ok(Self {
            root,
            include,
            exclude: compile_set(exclude)?,
            tokenizer: Tokenizer::default(),
        })
    }

    /// Replaces the tokenizer, returning the corpus for chaining.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the on-disk path of a document.
    pub fn path_of(&self, id: &DocumentId) -> PathBuf {
        id.as_str()
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Checks whether a root-relative path is selected by the patterns.
    fn selects(&self, rel_path: &Path) -> bool {
        self.include.is_match(rel_path) && !self.exclude.is_match(rel_path)
    }
}

impl Corpus for DirectoryCorpus {
    fn document_ids(&self) -> Result<Vec<DocumentId>, CorpusError> {
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        {
            let entry = entry.map_err(|e| CorpusError::Walk {
                path: e.path().unwrap_or(self.root.as_path()).to_path_buf(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            if !self.selects(rel_path) {
                continue;
            }

            let id = document_id_for(rel_path).ok_or_else(|| CorpusError::PathNotUtf8 {
                path: entry.path().to_path_buf(),
            })?;
            ids.push(id);
        }

        ids.sort();
        Ok(ids)
    }

    fn terms_of(&self, id: &DocumentId) -> Result<Terms<'_>, CorpusError> {
        let path = self.path_of(id);
        let bytes = fs::read(&path).map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| CorpusError::Decode { path })?;

        Ok(Box::new(self.tokenizer.tokenize(&text).into_iter().map(Ok)))
    }
}

/// Builds a document id from a root-relative path, or `None` if the path is not UTF-8.
fn document_id_for(rel_path: &Path) -> Option<DocumentId> {
    let parts = rel_path
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(DocumentId::from(parts.join("/")))
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Compiles a list of glob patterns into one set.
fn compile_set(patterns: &[String]) -> Result<GlobSet, CorpusError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| CorpusError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| CorpusError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}
