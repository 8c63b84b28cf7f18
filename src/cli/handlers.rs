//! Subcommand handlers. Each returns the process exit code.

use super::commands::{ClassifyArgs, CliArgs, PromptArgs};
use crate::config::JudgeConfig;
use crate::progress::{BarHandler, LoggingHandler, NoOpHandler, ProgressHandler};
use crate::prompt::PromptTemplate;
use crate::util::logging::{init_logging, resolve_level, LoggingConfig};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, error};

pub async fn handle_classify(args: &ClassifyArgs, cli: &CliArgs) -> i32 {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            init_cli_logging(cli, "info");
            error!("Configuration error: {:#}", e);
            eprintln!("\nPlease check the config file, environment variables and command-line arguments.");
            return 1;
        }
    };

    init_cli_logging(cli, &config.log_level);
    debug!("Resolved configuration:\n{}", config);

    if args.show_config {
        print!("{}", config);
        return 0;
    }

    let driver = match config.create_driver() {
        Ok(driver) => driver.with_progress(progress_handler(cli)),
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nPlease check the config file, environment variables and command-line arguments.");
            return 1;
        }
    };

    match driver.run().await {
        Ok(_) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("\n{}", e.help_message());
            1
        }
    }
}

pub fn handle_prompt(args: &PromptArgs, cli: &CliArgs) -> i32 {
    init_cli_logging(cli, &JudgeConfig::default().log_level);

    let template = match &args.template {
        Some(path) => match PromptTemplate::from_file(path) {
            Ok(template) => template,
            Err(e) => {
                error!("{}", e);
                return 1;
            }
        },
        None => PromptTemplate::default(),
    };

    println!("{}", template.render(&args.name, &args.description));
    0
}

/// Layers CLI flags over file and environment settings.
fn resolve_config(args: &ClassifyArgs) -> Result<JudgeConfig> {
    let mut config = JudgeConfig::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("loading {}", path.display()),
        None => "loading configuration from the environment".to_string(),
    })?;

    if let Some(input) = &args.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if !args.backends.is_empty() {
        config.backends = args.backends.clone();
    }
    if let Some(program) = &args.program {
        config.program = program.clone();
    }
    if !args.program_args.is_empty() {
        config.program_args = args.program_args.clone();
    }
    if let Some(template) = &args.template {
        config.template_path = Some(template.clone());
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = Some(timeout);
    }

    Ok(config)
}

fn init_cli_logging(cli: &CliArgs, configured_level: &str) {
    let level = resolve_level(cli.log_level.as_deref(), cli.verbose, cli.quiet, configured_level);
    init_logging(LoggingConfig::from_env(level));
}

/// A bar on interactive terminals, log lines otherwise, nothing when quiet.
fn progress_handler(cli: &CliArgs) -> Arc<dyn ProgressHandler> {
    if cli.quiet {
        Arc::new(NoOpHandler)
    } else if !cli.verbose && std::io::stderr().is_terminal() {
        Arc::new(BarHandler::new())
    } else {
        Arc::new(LoggingHandler)
    }
}
