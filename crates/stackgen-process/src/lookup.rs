//! Prerequisite tool discovery on the executable search path

use std::path::PathBuf;

use crate::error::{ProcessError, Result};

/// Require `command` to be present on the search path, returning its
/// resolved location.
pub fn require(command: &str) -> Result<PathBuf> {
    which::which(command).map_err(|_| ProcessError::ToolNotFound {
        command: command.to_string(),
    })
}

/// Whether `command` is present on the search path
pub fn is_installed(command: &str) -> bool {
    which::which(command).is_ok()
}
