//! # stackgen-cli
//!
//! **Purpose**: Command-line surface of the generator
//!
//! Parses the `new` command, runs the prerequisite check, collects any
//! values omitted from the command line via interactive prompts, and
//! hands the validated settings to the provisioning pipeline.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use std::path::PathBuf;

pub use cli::{Cli, Commands, NewArgs};
pub use error::{CliError, CliResult};

/// How a command run ended
#[derive(Debug)]
pub enum Outcome {
    /// Project generated at the contained path
    Completed(PathBuf),
    /// The user declined the final confirmation
    Cancelled,
}

/// Execute the parsed command line
pub async fn run(cli: Cli) -> CliResult<Outcome> {
    match cli.command {
        Commands::New(args) => commands::NewCommand::new(args).execute().await,
    }
}
