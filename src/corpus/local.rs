//! Template corpus read from a directory on disk.
//! Used to develop templates without rebuilding and by the test-suite.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use walkdir::WalkDir;

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};

use super::Corpus;

/// Builds the set of patterns for files that never belong to a corpus.
pub fn default_ignore_set() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| Error::CorpusError {
            path: pattern.to_string(),
            reason: format!("invalid ignore pattern: {e}"),
        })?);
    }
    builder.build().map_err(|e| Error::CorpusError {
        path: String::new(),
        reason: format!("ignore patterns failed to compile: {e}"),
    })
}

/// Corpus backed by a directory laid out like `templates/`.
pub struct LocalCorpus {
    root: PathBuf,
    ignored: GlobSet,
}

impl LocalCorpus {
    /// Creates a corpus rooted at `root`.
    ///
    /// # Errors
    /// * `Error::CorpusError` if `root` is not a directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::CorpusError {
                path: root.display().to_string(),
                reason: "template directory does not exist".to_string(),
            });
        }
        Ok(Self { root, ignored: default_ignore_set()? })
    }

    fn corpus_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl Corpus for LocalCorpus {
    fn walk(&self, root: &str) -> Result<Vec<String>> {
        let start = self.root.join(root);
        if !start.exists() {
            debug!("Corpus root '{}' does not exist", start.display());
            return Ok(Vec::new());
        }

        let mut leaves = Vec::new();
        for entry in WalkDir::new(&start).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::CorpusError {
                path: start.display().to_string(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(corpus_path) = self.corpus_path(entry.path()) else {
                continue;
            };
            if self.ignored.is_match(&corpus_path) {
                debug!("Ignoring '{corpus_path}'");
                continue;
            }
            leaves.push(corpus_path);
        }
        Ok(leaves)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        fs::read(&full).map_err(|e| Error::CorpusError {
            path: full.display().to_string(),
            reason: e.to_string(),
        })
    }
}
