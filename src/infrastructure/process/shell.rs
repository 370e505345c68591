//! Shell command executor

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::{ProcessError, ProcessExecutor};

/// Runs commands through the platform shell
///
/// The child inherits stdout and stderr; its exit status is only traced.
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command(line: &str) -> Command {
        if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.args(["/C", line]);
            command
        } else {
            let mut command = Command::new("sh");
            command.args(["-c", line]);
            command
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessExecutor for ShellExecutor {
    async fn spawn(&self, command: &str, cwd: &Path) -> Result<(), ProcessError> {
        if !cwd.is_dir() {
            return Err(ProcessError::NotFound(format!(
                "Directory {}",
                cwd.display()
            )));
        }

        let mut child = Self::command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProcessError::NotFound("Shell".to_string())
                } else {
                    ProcessError::SpawnFailed(e.to_string())
                }
            })?;

        let line = command.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(command = %line, %status, "command finished"),
                Err(e) => warn!(command = %line, error = %e, "waiting for command failed"),
            }
        });

        Ok(())
    }
}
