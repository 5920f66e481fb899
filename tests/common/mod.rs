#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use kiln::commands::{CommandRunner, PostCommand};
use kiln::config::Config;
use kiln::error::{Error, Result};
use walkdir::WalkDir;

/// Records every command instead of running it, optionally failing on one.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<String>>,
    pub fail_on: Option<&'static str>,
}

impl RecordingRunner {
    pub fn failing_on(command: &'static str) -> Self {
        Self { fail_on: Some(command), ..Self::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &PostCommand, _working_dir: &Path, _quiet: bool) -> Result<()> {
        let line = command.to_string();
        self.commands.borrow_mut().push(line.clone());
        if self.fail_on == Some(line.as_str()) {
            return Err(Error::ToolchainError {
                command: line,
                reason: "exited with exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A quiet, git-less configuration for project `acme` under `output_dir`.
pub fn acme_config(output_dir: &Path) -> Config {
    Config {
        name: "acme".to_string(),
        output_dir: output_dir.to_path_buf(),
        quiet: true,
        no_git: true,
        ..Config::default()
    }
}

/// Relative, slash-separated paths of every file under `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

/// Writes `files` (relative path, content) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    for (path, content) in files {
        let target = root.join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(target, content).unwrap();
    }
    root.to_path_buf()
}
