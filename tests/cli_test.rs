use clap::{error::ErrorKind, Parser};
use kiln::cli::Args;
use kiln::error::Error;
use kiln::model::{AppType, BackgroundJob, Billing, Database};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("kiln")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["acme"])).unwrap();

    assert_eq!(parsed.name.as_deref(), Some("acme"));
    assert_eq!(parsed.output_dir, None);
    assert!(!parsed.force);
    assert!(!parsed.quiet);
    assert!(!parsed.interactive);

    let config = parsed.to_config().unwrap();
    assert_eq!(config.name, "acme");
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.app_type, AppType::Api);
    assert_eq!(config.database, Database::Sqlite3);
    assert_eq!(config.background_job, BackgroundJob::None);
    assert!(config.smtp && config.storage && config.auth);
    assert!(!config.no_git);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "acme",
        "-o",
        "/tmp/work",
        "--app-type",
        "web",
        "--database",
        "Postgres",
        "--background-job",
        "asynq",
        "--billing",
        "stripe",
        "--no-smtp",
        "--no-storage",
        "--no-auth",
        "--serve-html",
        "--no-git",
        "--quiet",
        "--force",
        "--verbose",
    ]);
    let config = Args::try_parse_from(args).unwrap().to_config().unwrap();

    assert_eq!(config.output_dir, PathBuf::from("/tmp/work"));
    assert_eq!(config.app_type, AppType::Web);
    assert_eq!(config.database, Database::Postgres);
    assert_eq!(config.background_job, BackgroundJob::Asynq);
    assert_eq!(config.billing, Billing::Stripe);
    assert!(!config.smtp);
    assert!(!config.storage);
    assert!(!config.auth);
    assert!(config.serve_html);
    assert!(config.no_git);
    assert!(config.quiet);
    assert!(config.force);
}

#[test]
fn test_unknown_database_is_config_error() {
    let parsed = Args::try_parse_from(make_args(&["acme", "--database", "oracle"])).unwrap();
    match parsed.to_config() {
        Err(Error::ConfigError(message)) => assert!(message.contains("oracle")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_flags_override_answers_file() {
    let temp_dir = TempDir::new().unwrap();
    let answers = temp_dir.path().join("answers.yml");
    fs::write(&answers, "name: from-file\ndatabase: mysql\nredis: true\nstorage: false\n").unwrap();

    let parsed = Args::try_parse_from(make_args(&[
        "acme",
        "--config",
        answers.to_str().unwrap(),
        "--database",
        "mariadb",
    ]))
    .unwrap();
    let config = parsed.to_config().unwrap();

    assert_eq!(config.name, "acme");
    assert_eq!(config.database, Database::MariaDb);
    assert!(config.redis);
    assert!(!config.storage);
}

#[test]
fn test_missing_answers_file() {
    let parsed =
        Args::try_parse_from(make_args(&["acme", "-c", "/definitely/not/answers.yml"])).unwrap();
    assert!(matches!(parsed.to_config(), Err(Error::ConfigError(_))));
}

#[test]
fn test_name_is_required_without_interactive_or_config() {
    let err = Args::try_parse_from(make_args(&["--database", "postgres"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_name_is_optional_in_interactive_mode() {
    let parsed = Args::try_parse_from(make_args(&["--interactive"])).unwrap();
    assert!(parsed.interactive);
    assert_eq!(parsed.name, None);
}

#[test]
fn test_name_can_come_from_answers_file() {
    let temp_dir = TempDir::new().unwrap();
    let answers = temp_dir.path().join("answers.json");
    fs::write(&answers, r#"{"name": "acme", "app_type": "web"}"#).unwrap();

    let parsed =
        Args::try_parse_from(make_args(&["--config", answers.to_str().unwrap()])).unwrap();
    let config = parsed.to_config().unwrap();
    assert_eq!(config.name, "acme");
    assert_eq!(config.app_type, AppType::Web);
}
