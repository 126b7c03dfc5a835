//! Error types for external tool invocation

use std::io;

use thiserror::Error;

/// Result type for tool invocation
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors raised when running or locating external tools
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The tool could not be started at all
    #[error("Failed to run {command}: {source}")]
    SpawnFailed { command: String, source: io::Error },

    /// The tool ran and reported failure
    #[error("{command} exited with status {code}")]
    ExitStatus { command: String, code: i32 },

    /// The tool was killed by a signal before reporting a status
    #[error("{command} was terminated by a signal")]
    Terminated { command: String },

    /// A required tool is not installed
    #[error("Required tool not found on PATH: {command}")]
    ToolNotFound { command: String },
}
