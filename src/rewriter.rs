//! Post-materialization path rewriting.
//! Moves generated files according to the rename table of the project's app
//! type, then removes directories that the moves left empty.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::ProjectModel;
use crate::processor::{resolve_target_path, write_file};
use crate::rules::SelectionRules;

/// Copies `source` to `target`, then deletes `source`.
///
/// # Errors
/// * `Error::IoError` naming the path of the failed read, write or delete
pub fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    let content = fs::read(source).map_err(|e| Error::io(source, e))?;
    write_file(target, &content)?;
    fs::remove_file(source).map_err(|e| Error::io(source, e))
}

/// Moves `source` to `target`, falling back to [`copy_then_remove`] when an
/// atomic rename is not possible (e.g. across devices).
///
/// # Errors
/// * `Error::IoError` if the fallback copy or delete fails
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, target) {
        warn!(
            "Rename '{}' -> '{}' failed ({e}), copying instead",
            source.display(),
            target.display()
        );
        copy_then_remove(source, target)?;
    }
    Ok(())
}

/// Applies `(old, new)` renames relative to `output_root`.
///
/// Missing sources are skipped silently, which makes re-running a no-op.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Source directories of the renames that happened
pub fn apply_renames(output_root: &Path, renames: &[(String, String)]) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for (old, new) in renames {
        let source = resolve_target_path(old, output_root);
        if !source.exists() {
            debug!("Rename source '{}' does not exist, skipping", source.display());
            continue;
        }
        let target = resolve_target_path(new, output_root);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        debug!("Renaming '{}' to '{}'", source.display(), target.display());
        move_file(&source, &target)?;
        if let Some(parent) = source.parent() {
            candidates.push(parent.to_path_buf());
        }
    }
    Ok(candidates)
}

/// Removes empty subdirectories of `dir`, then `dir` itself if it ended up empty.
///
/// # Returns
/// * `Result<bool>` - Whether `dir` was removed
pub fn prune_dir(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut is_empty = true;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if !(file_type.is_dir() && prune_dir(&path)?) {
            is_empty = false;
        }
    }
    if is_empty {
        debug!("Removing empty directory '{}'", dir.display());
        fs::remove_dir(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(is_empty)
}

/// Prunes candidate directories, deepest first. The output root itself is
/// never removed.
pub fn prune_empty_dirs(output_root: &Path, mut candidates: Vec<PathBuf>) -> Result<()> {
    candidates.sort_by(|a, b| b.as_os_str().len().cmp(&a.as_os_str().len()).then(a.cmp(b)));
    candidates.dedup();
    for dir in candidates {
        if dir == output_root || !dir.starts_with(output_root) || !dir.is_dir() {
            continue;
        }
        prune_dir(&dir)?;
    }
    Ok(())
}

/// Runs the rename and prune phases for `model`.
pub fn rewrite_paths(output_root: &Path, rules: &SelectionRules, model: &ProjectModel) -> Result<()> {
    let candidates = apply_renames(output_root, rules.renames_for(model.app_type()))?;
    prune_empty_dirs(output_root, candidates)
}
