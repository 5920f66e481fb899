//! Kiln's main application entry point.
//! Parses arguments, assembles the configuration and hands it to the driver.

use kiln::{
    cli::{get_args, Args},
    commands::SystemRunner,
    corpus::LocalCorpus,
    driver::{generate, generate_with},
    error::{default_error_handler, Result},
    logger::init_logger,
    prompt::{prompt_config, DialoguerPrompter},
    rules::{lint, SelectionRules},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Builds the configuration from the answers file and flags
/// 2. Prompts for the remaining choices in interactive mode
/// 3. Selects the embedded or an on-disk template corpus, checking the
///    latter against the rule tables
/// 4. Generates the project and runs the toolchain
fn run(args: Args) -> Result<()> {
    let mut config = args.to_config()?;
    if args.interactive {
        config = prompt_config(&DialoguerPrompter::new(), config)?;
    }

    match &args.templates {
        Some(dir) => {
            let corpus = LocalCorpus::new(dir)?;
            lint::check(&corpus, &SelectionRules::standard())?;
            generate_with(&config, &corpus, &SystemRunner)?;
        }
        None => {
            generate(&config)?;
        }
    }
    Ok(())
}
