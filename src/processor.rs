//! Materialization of the template corpus.
//! Walks every leaf under the corpus root, decides whether it belongs to the
//! project, renders `.templ` leaves and writes the result under the output root.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{BASE_ROOT, TEMPLATE_SUFFIX};
use crate::corpus::{strip_root, Corpus};
use crate::error::{Error, Result};
use crate::model::ProjectModel;
use crate::renderer::TemplateRenderer;
use crate::rules::{ExclusionCategory, SelectionRules};

/// Whether the corpus-relative path names a template.
pub fn is_template_path(relative_path: &str) -> bool {
    relative_path.ends_with(TEMPLATE_SUFFIX)
}

/// Corpus-relative path with a trailing `.templ` removed.
pub fn logical_path(relative_path: &str) -> &str {
    relative_path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(relative_path)
}

/// Joins a slash-separated logical path onto `output_root`.
pub fn resolve_target_path<P: AsRef<Path>>(logical_path: &str, output_root: P) -> PathBuf {
    logical_path
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(output_root.as_ref().to_path_buf(), |path, part| path.join(part))
}

/// Writes `content`, creating missing parent directories first.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// What happens to a single corpus leaf.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Leaf is not part of this project.
    Skip { category: ExclusionCategory },
    /// Literal leaf copied byte for byte.
    Copy { target: PathBuf, content: Vec<u8> },
    /// Template leaf rendered with the project model.
    Write { target: PathBuf, content: String },
}

/// Walks the corpus and emits one output file per selected leaf.
pub struct Processor<'a> {
    corpus: &'a dyn Corpus,
    engine: &'a dyn TemplateRenderer,
    rules: &'a SelectionRules,
    model: &'a ProjectModel,
    output_root: &'a Path,
    context: serde_json::Value,
}

impl<'a> Processor<'a> {
    pub fn new(
        corpus: &'a dyn Corpus,
        engine: &'a dyn TemplateRenderer,
        rules: &'a SelectionRules,
        model: &'a ProjectModel,
        output_root: &'a Path,
    ) -> Self {
        Self { corpus, engine, rules, model, output_root, context: model.context() }
    }

    /// Decides what to do with a single corpus leaf without touching the output tree.
    ///
    /// # Arguments
    /// * `leaf` - Corpus path of the leaf, e.g. `base/cmd/app/main.go.templ`
    ///
    /// # Returns
    /// * `Result<FileOperation>` - Skip, copy or write
    ///
    /// # Errors
    /// * `Error::CorpusError` if the logical path is empty, the leaf cannot be
    ///   read or a template is not UTF-8
    /// * `Error::TemplateError` if rendering fails
    pub fn process(&self, leaf: &str) -> Result<FileOperation> {
        let relative = strip_root(leaf, BASE_ROOT);
        let logical = logical_path(relative);
        if logical.is_empty() || logical.ends_with('/') {
            return Err(Error::CorpusError {
                path: leaf.to_string(),
                reason: "leaf maps to an empty output path".to_string(),
            });
        }

        if let Some(category) = self.rules.excluded(logical, self.model) {
            debug!("Skipping '{logical}' ({category})");
            return Ok(FileOperation::Skip { category });
        }

        let target = resolve_target_path(logical, self.output_root);
        let content = self.corpus.read(leaf)?;

        if is_template_path(relative) {
            let text = String::from_utf8(content).map_err(|e| Error::CorpusError {
                path: leaf.to_string(),
                reason: format!("template is not valid UTF-8: {e}"),
            })?;
            let rendered = self.engine.render(leaf, &text, &self.context)?;
            debug!("Rendering '{}' to '{}'", leaf, target.display());
            Ok(FileOperation::Write { target, content: rendered })
        } else {
            debug!("Copying '{}' to '{}'", leaf, target.display());
            Ok(FileOperation::Copy { target, content })
        }
    }

    /// Materializes every selected leaf.
    ///
    /// Aborts on the first failure; files written before it stay on disk.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Paths written, in corpus order
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for leaf in self.corpus.walk(BASE_ROOT)? {
            match self.process(&leaf)? {
                FileOperation::Skip { .. } => {}
                FileOperation::Copy { target, content } => {
                    write_file(&target, &content)?;
                    written.push(target);
                }
                FileOperation::Write { target, content } => {
                    write_file(&target, content.as_bytes())?;
                    written.push(target);
                }
            }
        }
        Ok(written)
    }
}
