//! Error types for template operations

use std::path::PathBuf;

use thiserror::Error;

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors that can occur while rendering templates or patching files
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A placeholder token survived substitution
    #[error("Unresolved placeholder {token} in {file}")]
    UnresolvedPlaceholder { token: String, file: String },

    /// Tree rendering was asked to walk something that is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A patch rule pattern failed to compile
    #[error("Invalid patch pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
