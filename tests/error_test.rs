use std::io;
use std::path::PathBuf;

use kiln::error::Error;

#[test]
fn test_error_display() {
    let err = Error::ConfigError("project name must not be empty".to_string());
    assert_eq!(err.to_string(), "Configuration error: project name must not be empty.");

    let err = Error::OutputDirectoryExistsError { output_dir: "/tmp/work/acme".to_string() };
    assert_eq!(
        err.to_string(),
        "Output directory: '/tmp/work/acme' already exists. Use --force to overwrite it."
    );

    let err = Error::ToolchainError {
        command: "go build ./...".to_string(),
        reason: "exited with exit status: 1".to_string(),
    };
    assert_eq!(err.to_string(), "Command 'go build ./...' failed: exited with exit status: 1.");
}

#[test]
fn test_io_error_names_path() {
    let err = Error::io(
        PathBuf::from("/tmp/work/acme/go.mod"),
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    );
    match &err {
        Error::IoError { path, .. } => assert_eq!(path, &PathBuf::from("/tmp/work/acme/go.mod")),
        other => panic!("Expected IoError, got {other:?}"),
    }
    assert!(err.to_string().contains("/tmp/work/acme/go.mod"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_corpus_error_names_path() {
    let err = Error::CorpusError {
        path: "base/missing.go.templ".to_string(),
        reason: "no such embedded file".to_string(),
    };
    assert_eq!(err.to_string(), "Corpus error: 'base/missing.go.templ': no such embedded file.");
}
