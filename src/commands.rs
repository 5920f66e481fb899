//! Post-generation command pipeline.
//! Runs the Go toolchain inside the generated project and optionally
//! initializes a git repository with an initial commit.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::INITIAL_COMMIT_MESSAGE;
use crate::error::{Error, Result};
use crate::model::ProjectModel;

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PostCommand {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self { program: program.into(), args: args.iter().map(|a| a.to_string()).collect() }
    }
}

impl fmt::Display for PostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Fixed toolchain commands run after materialization.
pub fn toolchain_commands(model: &ProjectModel) -> Vec<PostCommand> {
    vec![
        PostCommand::new("go", &["mod", "init", model.name()]),
        PostCommand::new("go", &["mod", "tidy"]),
        PostCommand::new("gofmt", &["-w", "."]),
        PostCommand::new("go", &["build", "./..."]),
    ]
}

/// Git initialization commands, using quiet variants where git has them.
pub fn vcs_commands(quiet: bool) -> Vec<PostCommand> {
    if quiet {
        vec![
            PostCommand::new("git", &["init", "-q"]),
            PostCommand::new("git", &["add", "-A"]),
            PostCommand::new("git", &["commit", "-q", "-m", INITIAL_COMMIT_MESSAGE]),
        ]
    } else {
        vec![
            PostCommand::new("git", &["init"]),
            PostCommand::new("git", &["add", "-A"]),
            PostCommand::new("git", &["commit", "-m", INITIAL_COMMIT_MESSAGE]),
        ]
    }
}

/// Trait for executing post-generation commands.
pub trait CommandRunner {
    /// Runs `command` with `working_dir` as its current directory and waits for it.
    ///
    /// # Errors
    /// * `Error::ToolchainError` if the command cannot start or exits unsuccessfully
    fn run(&self, command: &PostCommand, working_dir: &Path, quiet: bool) -> Result<()>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &PostCommand, working_dir: &Path, quiet: bool) -> Result<()> {
        let (stdout, stderr) = if quiet {
            (Stdio::null(), Stdio::null())
        } else {
            (Stdio::inherit(), Stdio::inherit())
        };

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|e| Error::ToolchainError {
                command: command.to_string(),
                reason: format!("could not be started: {e}"),
            })?;

        if !status.success() {
            return Err(Error::ToolchainError {
                command: command.to_string(),
                reason: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}

/// Runs `commands` in order, stopping at the first failure.
pub fn run_pipeline(
    runner: &dyn CommandRunner,
    commands: &[PostCommand],
    working_dir: &Path,
    quiet: bool,
) -> Result<()> {
    for command in commands {
        debug!("Running '{}' in '{}'", command, working_dir.display());
        if !quiet {
            println!("Running: {command}");
        }
        runner.run(command, working_dir, quiet)?;
    }
    Ok(())
}

/// Runs the toolchain commands, then git initialization unless disabled.
///
/// # Errors
/// * `Error::ToolchainError` from the first failing command; no later
///   command, git included, is executed
pub fn run_post_commands(
    runner: &dyn CommandRunner,
    model: &ProjectModel,
    project_dir: &Path,
    quiet: bool,
    init_git: bool,
) -> Result<()> {
    run_pipeline(runner, &toolchain_commands(model), project_dir, quiet)?;
    if init_git {
        run_pipeline(runner, &vcs_commands(quiet), project_dir, quiet)?;
    }
    Ok(())
}
