//! Error handling for the Kiln application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for Kiln operations.
///
/// This enum represents all possible errors that can occur within the Kiln application.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user choices: bad project name, unknown enumerant,
    /// unreadable answers file or unreachable output directory.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The project directory already exists and is not empty.
    #[error("Output directory: '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// A corpus leaf could not be read or mapped to an output path.
    #[error("Corpus error: '{path}': {reason}.")]
    CorpusError { path: String, reason: String },

    /// Template parsing or rendering failed, including fragment resolver failures.
    #[error("Template error in '{path}': {source}.")]
    TemplateError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// Represents errors that occur during file system operations
    #[error("IO error at '{}': {source}.", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A post-generation command could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}.")]
    ToolchainError { command: String, reason: String },

    /// Interactive prompt failure.
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

impl Error {
    /// Wraps an `io::Error` together with the path it occurred on.
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::IoError { path: path.into(), source }
    }
}

/// Convenience type alias for Results with Kiln's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
