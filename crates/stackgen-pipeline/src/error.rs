//! Error types for the provisioning pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can abort a provisioning run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Descriptor validation failed before any side effect
    #[error("{0}")]
    Validation(String),

    /// The target project directory already exists
    #[error("Project directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Template rendering or patching failed
    #[error("{0}")]
    Template(#[from] stackgen_templates::TemplateError),

    /// Feature resolution failed
    #[error("{0}")]
    Feature(#[from] stackgen_features::FeatureError),

    /// An external tool failed to run or exited non-zero
    #[error("{0}")]
    Process(#[from] stackgen_process::ProcessError),

    /// Version-control initialization failed
    #[error("{0}")]
    Vcs(#[from] stackgen_vcs::VcsError),

    /// Boilerplate download failed
    #[error("Failed to download {url}: {message}")]
    Fetch { url: String, message: String },

    /// The editor task file is missing its task list
    #[error("Editor task merge failed: {message}")]
    EditorTasks { message: String },

    /// Structured data could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
