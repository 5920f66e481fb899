//! Raw user choices for a generation run.
//! A `Config` can be assembled from command-line flags, loaded from a YAML or
//! JSON answers file, or filled in interactively.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{AppType, BackgroundJob, Billing, Database};

/// Every choice the driver needs before generating a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project name, used as Go module name and as directory name.
    pub name: String,
    /// Parent directory of the generated project.
    pub output_dir: PathBuf,
    pub app_type: AppType,
    pub database: Database,
    pub background_job: BackgroundJob,
    pub billing: Billing,
    pub smtp: bool,
    pub storage: bool,
    /// Requested auth; only honoured together with SMTP and a database.
    pub auth: bool,
    pub redis: bool,
    /// Ship HTML assets even for API projects.
    pub serve_html: bool,
    /// Suppress progress output and child process chatter.
    pub quiet: bool,
    /// Skip git initialization.
    pub no_git: bool,
    /// Allow generating into an existing, non-empty project directory.
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::new(),
            output_dir: PathBuf::from("."),
            app_type: AppType::default(),
            database: Database::default(),
            background_job: BackgroundJob::default(),
            billing: Billing::default(),
            smtp: true,
            storage: true,
            auth: true,
            redis: false,
            serve_html: false,
            quiet: false,
            no_git: false,
            force: false,
        }
    }
}

impl Config {
    /// Parses an answers document. JSON is accepted as a subset of YAML.
    ///
    /// # Errors
    /// * `Error::ConfigError` on malformed content, unknown keys or unknown enumerants
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid answers file: {e}")))
    }

    /// Loads an answers file from disk.
    ///
    /// # Arguments
    /// * `path` - Path to a `.yaml`, `.yml` or `.json` answers file
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading answers from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read answers file '{}': {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Directory the project is generated into: `output_dir/name`.
    pub fn project_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }
}

/// Validates the parent directory and returns the project directory.
///
/// # Arguments
/// * `config` - Run configuration
///
/// # Returns
/// * `Result<PathBuf>` - `output_dir/name`, safe to write to
///
/// # Errors
/// * `Error::ConfigError` if `output_dir` does not exist or is not a directory
/// * `Error::OutputDirectoryExistsError` if the project directory exists,
///   is not empty and `force` is false
pub fn get_output_dir(config: &Config) -> Result<PathBuf> {
    let parent = &config.output_dir;
    if !parent.is_dir() {
        return Err(Error::ConfigError(format!(
            "output directory '{}' does not exist or is not a directory",
            parent.display()
        )));
    }

    let project_dir = config.project_dir();
    if project_dir.exists() && !config.force {
        let is_empty = fs::read_dir(&project_dir)
            .map_err(|e| Error::io(&project_dir, e))?
            .next()
            .is_none();
        if !is_empty {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: project_dir.display().to_string(),
            });
        }
    }
    Ok(project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_answers() {
        let config = Config::parse(
            "name: acme\ndatabase: postgres\nbackground_job: asynq\napp_type: web\nsmtp: false\n",
        )
        .unwrap();
        assert_eq!(config.name, "acme");
        assert_eq!(config.database, Database::Postgres);
        assert_eq!(config.background_job, BackgroundJob::Asynq);
        assert_eq!(config.app_type, AppType::Web);
        assert!(!config.smtp);
        assert!(config.storage);
    }

    #[test]
    fn test_parse_json_answers() {
        let config = Config::parse(r#"{"name": "acme", "database": "mysql"}"#).unwrap();
        assert_eq!(config.database, Database::MySql);
    }

    #[test]
    fn test_parse_rejects_unknown_database() {
        let err = Config::parse("name: acme\ndatabase: oracle\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(Config::parse("name: acme\ncolour: blue\n").is_err());
    }
}
