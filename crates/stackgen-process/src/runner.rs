//! The tool-runner seam and its system implementation

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{
    config::ProcessConfig,
    error::{ProcessError, Result},
};

/// Captured result of a completed tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code reported by the tool
    pub code: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the tool reported success
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs external tools to completion.
///
/// The pipeline blocks on every invocation; there is no retry and no
/// concurrency. Implementations other than [`SystemToolRunner`] exist
/// for tests.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run a tool to completion, capturing its output. Spawn failure
    /// is an error; a non-zero exit is reported in the returned output.
    async fn run(&self, config: ProcessConfig) -> Result<ToolOutput>;

    /// Run a tool and require a zero exit status
    async fn run_checked(&self, config: ProcessConfig) -> Result<ToolOutput> {
        let command = config.command.clone();
        let output = self.run(config).await?;
        if !output.success() {
            return Err(ProcessError::ExitStatus {
                command,
                code: output.code,
            });
        }
        Ok(output)
    }
}

/// Tool runner backed by real child processes
pub struct SystemToolRunner;

#[async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, config: ProcessConfig) -> Result<ToolOutput> {
        debug!(
            command = %config.command,
            args = ?config.args,
            working_dir = ?config.working_dir,
            "Running external tool"
        );

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);
        if let Some(ref dir) = config.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &config.env {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|e| ProcessError::SpawnFailed {
            command: config.command.clone(),
            source: e,
        })?;
        let code = output
            .status
            .code()
            .ok_or_else(|| ProcessError::Terminated {
                command: config.command.clone(),
            })?;

        debug!(command = %config.command, code, "External tool finished");
        Ok(ToolOutput {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemToolRunner;
        let output = runner
            .run(ProcessConfig::new("echo").args(&["hello"]))
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_checked_rejects_nonzero_exit() {
        let runner = SystemToolRunner;
        let err = runner
            .run_checked(ProcessConfig::new("sh").args(&["-c", "exit 3"]))
            .await
            .unwrap_err();
        match err {
            ProcessError::ExitStatus { command, code } => {
                assert_eq!(command, "sh");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_failure_names_the_command() {
        let runner = SystemToolRunner;
        let err = runner
            .run(ProcessConfig::new("definitely-not-a-real-tool-42"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    }
}
