//! Interactive front-end.
//! Asks for every choice of a [`Config`], offering the current values as defaults.

use dialoguer::{Confirm, Input, Select};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{validate_name, AppType, BackgroundJob, Billing, Choice, Database};

/// Trait for asking the user questions.
pub trait Prompter {
    /// Asks for free text.
    fn text(&self, prompt: &str, default: &str) -> Result<String>;
    /// Asks to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

fn prompt_choice<T: Choice>(prompter: &dyn Prompter, prompt: &str, current: T) -> Result<T> {
    let names = T::names();
    let default = T::ALL.iter().position(|c| *c == current).unwrap_or(0);
    let index = prompter.select(prompt, &names, default)?;
    T::ALL
        .get(index)
        .copied()
        .ok_or_else(|| Error::PromptError(format!("selection {index} out of range")))
}

/// Fills in a configuration interactively.
///
/// # Arguments
/// * `prompter` - Source of answers
/// * `config` - Current values, used as defaults
///
/// # Returns
/// * `Result<Config>` - Configuration with every answer applied
///
/// # Errors
/// * `Error::ConfigError` if the project name is invalid
/// * `Error::PromptError` if interaction fails
pub fn prompt_config(prompter: &dyn Prompter, config: Config) -> Result<Config> {
    let name = prompter.text("Project name", &config.name)?;
    validate_name(&name)?;

    let app_type: AppType = prompt_choice(prompter, "Application type", config.app_type)?;
    let database: Database = prompt_choice(prompter, "Database", config.database)?;
    let background_job: BackgroundJob =
        prompt_choice(prompter, "Background jobs", config.background_job)?;
    let billing: Billing = prompt_choice(prompter, "Billing", config.billing)?;
    let smtp = prompter.confirm("Send email over SMTP?", config.smtp)?;
    let storage = prompter.confirm("Use object storage?", config.storage)?;

    let auth = if smtp && database != Database::None {
        prompter.confirm("Add user authentication?", config.auth)?
    } else {
        false
    };
    let redis = if background_job.requires_redis() {
        true
    } else {
        prompter.confirm("Add Redis?", config.redis)?
    };
    let serve_html = if app_type == AppType::Api {
        prompter.confirm("Serve HTML assets as well?", config.serve_html)?
    } else {
        config.serve_html
    };
    let no_git = !prompter.confirm("Initialize a git repository?", !config.no_git)?;

    Ok(Config {
        name,
        app_type,
        database,
        background_job,
        billing,
        smtp,
        storage,
        auth,
        redis,
        serve_html,
        no_git,
        ..config
    })
}
