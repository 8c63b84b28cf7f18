use newsjudge::cli::commands::{CliArgs, Commands};
use newsjudge::cli::handlers::{handle_classify, handle_prompt};

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();

    let exit_code = match &args.command {
        Commands::Classify(classify_args) => handle_classify(classify_args, &args).await,
        Commands::Prompt(prompt_args) => handle_prompt(prompt_args, &args),
    };

    std::process::exit(exit_code);
}
