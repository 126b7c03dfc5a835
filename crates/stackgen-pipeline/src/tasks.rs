//! Editor task-list merging
//!
//! Feature modules can ship extra editor tasks. Those are appended to
//! the project's existing task file structurally, not textually, so
//! the result stays valid JSON whatever the base file looks like.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Append the tasks from `extra` (a JSON document with a `tasks`
/// array) to the task file at `dest`, preserving existing entries.
pub fn merge_task_lists(dest: &Path, extra: &str) -> Result<()> {
    let mut base: Value = serde_json::from_str(&fs::read_to_string(dest)?)?;
    let addition: Value = serde_json::from_str(extra)?;

    let added = match addition.get("tasks").and_then(Value::as_array) {
        Some(tasks) => tasks.clone(),
        None => {
            return Err(PipelineError::EditorTasks {
                message: "additional task document has no 'tasks' array".to_string(),
            })
        }
    };
    let existing = match base.get_mut("tasks").and_then(Value::as_array_mut) {
        Some(tasks) => tasks,
        None => {
            return Err(PipelineError::EditorTasks {
                message: format!("{} has no 'tasks' array", dest.display()),
            })
        }
    };

    debug!(
        "Appending {} editor tasks to {}",
        added.len(),
        dest.display()
    );
    existing.extend(added);
    fs::write(dest, serde_json::to_string_pretty(&base)?)?;
    Ok(())
}
