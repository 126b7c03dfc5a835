//! CLI-specific errors

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{0}")]
    Pipeline(#[from] stackgen_pipeline::PipelineError),

    #[error("{0}")]
    Process(#[from] stackgen_process::ProcessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
