//! Generation driver.
//! Sequences the phases of a run: materialize, rename, prune, post-commands, git.

use std::path::{Path, PathBuf};

use log::debug;

use crate::commands::{run_post_commands, CommandRunner, SystemRunner};
use crate::config::{get_output_dir, Config};
use crate::corpus::{Corpus, EmbeddedCorpus};
use crate::error::Result;
use crate::model::ProjectModel;
use crate::processor::Processor;
use crate::renderer::MiniJinjaRenderer;
use crate::rewriter::rewrite_paths;
use crate::rules::{FragmentTable, SelectionRules};

/// Writes every selected corpus leaf for `model` under `output_root`.
///
/// This is the materialization phase on its own; nothing is renamed and no
/// command is run.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Files written
pub fn materialize(
    corpus: &dyn Corpus,
    rules: &SelectionRules,
    model: &ProjectModel,
    output_root: &Path,
) -> Result<Vec<PathBuf>> {
    let fragments = FragmentTable::load(corpus, model.database())?;
    let engine = MiniJinjaRenderer::with_fragments(fragments);
    Processor::new(corpus, &engine, rules, model, output_root).materialize()
}

/// Generates a project from the embedded corpus and runs the real toolchain.
///
/// # Returns
/// * `Result<PathBuf>` - Directory of the generated project
pub fn generate(config: &Config) -> Result<PathBuf> {
    generate_with(config, &EmbeddedCorpus::new(), &SystemRunner)
}

/// Generates a project from `corpus`, running post-commands through `runner`.
///
/// # Flow
/// 1. Derives the project model and validates the output directory
/// 2. Materializes the corpus
/// 3. Applies renames and prunes emptied directories
/// 4. Runs the toolchain commands
/// 5. Initializes git unless `no_git` is set
///
/// # Errors
/// Any error aborts the run immediately. The project directory is left as
/// it was at the point of failure.
pub fn generate_with(
    config: &Config,
    corpus: &dyn Corpus,
    runner: &dyn CommandRunner,
) -> Result<PathBuf> {
    let model = ProjectModel::from_config(config)?;
    let project_dir = get_output_dir(config)?;
    let rules = SelectionRules::standard();
    debug!("Generating {:?} into '{}'", model, project_dir.display());

    let written = materialize(corpus, &rules, &model, &project_dir)?;
    if !config.quiet {
        println!("Generated {} files in '{}'", written.len(), project_dir.display());
    }

    rewrite_paths(&project_dir, &rules, &model)?;
    run_post_commands(runner, &model, &project_dir, config.quiet, !config.no_git)?;

    if !config.quiet {
        println!("Project '{}' created successfully in {}.", model.name(), project_dir.display());
    }
    Ok(project_dir)
}
