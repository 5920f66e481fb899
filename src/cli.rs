//! Command-line interface implementation for Kiln.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Command-line arguments structure for Kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "Kiln: Go web project scaffolding tool", long_about = None)]
pub struct Args {
    /// Project name, used as Go module name and directory name
    #[arg(value_name = "NAME", required_unless_present_any = ["interactive", "config"])]
    pub name: Option<String>,

    /// Directory in which the project directory is created
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Application type: api or web
    #[arg(long, value_name = "TYPE")]
    pub app_type: Option<String>,

    /// Database: none, sqlite3, postgres, mysql or mariadb
    #[arg(long, value_name = "ENGINE")]
    pub database: Option<String>,

    /// Background jobs: none, sqs, asynq or basic
    #[arg(long, value_name = "BACKEND")]
    pub background_job: Option<String>,

    /// Billing provider: none or stripe
    #[arg(long, value_name = "PROVIDER")]
    pub billing: Option<String>,

    /// Do not generate the SMTP mailer (also disables auth)
    #[arg(long)]
    pub no_smtp: bool,

    /// Do not generate the object storage package
    #[arg(long)]
    pub no_storage: bool,

    /// Do not generate authentication
    #[arg(long)]
    pub no_auth: bool,

    /// Add Redis wiring
    #[arg(long)]
    pub redis: bool,

    /// Serve HTML assets even for API projects
    #[arg(long)]
    pub serve_html: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Suppress progress output and toolchain chatter
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate into an existing, non-empty project directory
    #[arg(short, long)]
    pub force: bool,

    /// Load answers from a YAML or JSON file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read templates from a directory instead of the embedded ones
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Ask for every choice interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds a configuration from the answers file (if any) and the flags.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the answers file is invalid or an enum flag
    ///   names an unknown value
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(app_type) = &self.app_type {
            config.app_type = app_type.parse()?;
        }
        if let Some(database) = &self.database {
            config.database = database.parse()?;
        }
        if let Some(background_job) = &self.background_job {
            config.background_job = background_job.parse()?;
        }
        if let Some(billing) = &self.billing {
            config.billing = billing.parse()?;
        }

        config.smtp &= !self.no_smtp;
        config.storage &= !self.no_storage;
        config.auth &= !self.no_auth;
        config.redis |= self.redis;
        config.serve_html |= self.serve_html;
        config.no_git |= self.no_git;
        config.quiet |= self.quiet;
        config.force |= self.force;
        Ok(config)
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 and the help text if NAME is missing outside
///   interactive mode and without an answers file
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                if let Err(err) = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                {
                    eprintln!("{e}");
                    eprintln!("Failed to print help: {err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
