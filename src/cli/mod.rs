pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, ClassifyArgs, Commands, PromptArgs};
