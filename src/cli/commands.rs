use crate::config::BackendSpec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Batch relevance triage of news articles with local LLM backends
#[derive(Parser, Debug)]
#[command(
    name = "newsjudge",
    about = "Ask several local LLMs whether each news article is relevant",
    version,
    long_about = "newsjudge reads a JSON array of articles, asks every configured backend \
                  (by default three Ollama models) for a Oui/Non relevance judgment, and \
                  writes one CSV row per article, flushed to disk as soon as it is known."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logs, no progress bar)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify every article of the input file",
        long_about = "Loads the article collection, asks each backend in turn for every article \
                      and writes the answers to a CSV file. A backend that fails only affects \
                      its own column: the error text is stored in place of the answer.\n\n\
                      Examples:\n  \
                      newsjudge classify\n  \
                      newsjudge classify -i orange.json -o resultats.csv\n  \
                      newsjudge classify -b gemma2=gemma2:9b -b llama3.2:latest\n  \
                      newsjudge classify --timeout 120 --config newsjudge.toml"
    )]
    Classify(ClassifyArgs),

    #[command(
        about = "Print the prompt that would be sent for one article",
        long_about = "Renders the prompt template for the given article fields and prints it \
                      on stdout without running any backend.\n\n\
                      Examples:\n  \
                      newsjudge prompt --name \"Orange se retire de Wall Street\"\n  \
                      newsjudge prompt --name Titre --description Résumé --template prompt.txt"
    )]
    Prompt(PromptArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(short = 'i', long, value_name = "FILE", help = "JSON array of articles")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long, value_name = "FILE", help = "CSV file to (over)write")]
    pub output: Option<PathBuf>,

    #[arg(short = 'c', long, value_name = "FILE", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'b',
        long = "backend",
        value_name = "LABEL=MODEL",
        value_parser = parse_backend,
        help = "Backend to ask, repeatable; replaces the default list"
    )]
    pub backends: Vec<BackendSpec>,

    #[arg(long, value_name = "PROGRAM", help = "Backend launcher (default: ollama)")]
    pub program: Option<String>,

    #[arg(
        long = "program-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        help = "Argument placed before the model name, repeatable (default: run)"
    )]
    pub program_args: Vec<String>,

    #[arg(short = 't', long, value_name = "FILE", help = "Custom prompt template")]
    pub template: Option<PathBuf>,

    #[arg(long, value_name = "SECONDS", help = "Give up on a backend after this long")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Print the resolved configuration and exit")]
    pub show_config: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PromptArgs {
    #[arg(long, default_value = "", help = "Article title")]
    pub name: String,

    #[arg(long, default_value = "", help = "Article description")]
    pub description: String,

    #[arg(short = 't', long, value_name = "FILE", help = "Custom prompt template")]
    pub template: Option<PathBuf>,
}

fn parse_backend(s: &str) -> Result<BackendSpec, String> {
    s.parse::<BackendSpec>().map_err(|e| e.to_string())
}
