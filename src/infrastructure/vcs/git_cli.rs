//! git command-line adapter

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{VcsError, VersionControl};

/// Output fragments git prints when a commit has nothing staged.
///
/// Only valid for untranslated output, see `run`.
const NOTHING_TO_COMMIT_MARKERS: [&str; 3] = [
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
];

/// Version control through the `git` binary on `PATH`
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(
        &self,
        dir: &Path,
        args: &[&str],
        on_error: fn(String) -> VcsError,
    ) -> Result<Output, VcsError> {
        debug!(dir = %dir.display(), ?args, "running git");
        Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .env("LC_ALL", "C")
            .env("LANGUAGE", "")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    VcsError::ToolNotFound
                } else {
                    on_error(e.to_string())
                }
            })
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage_all(&self, dir: &Path) -> Result<(), VcsError> {
        let output = self
            .run(dir, &["add", "-A", "."], VcsError::StageFailed)
            .await?;
        if !output.status.success() {
            return Err(VcsError::StageFailed(combined_output(&output)));
        }
        Ok(())
    }

    async fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        let output = self
            .run(dir, &["commit", "-m", message], VcsError::CommitFailed)
            .await?;
        if output.status.success() {
            return Ok(());
        }
        Err(classify_commit_failure(&combined_output(&output)))
    }
}

/// Map a failed commit's output to an error
fn classify_commit_failure(output: &str) -> VcsError {
    if NOTHING_TO_COMMIT_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
    {
        VcsError::NothingToCommit
    } else {
        VcsError::CommitFailed(output.to_string())
    }
}

fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = format!("{}\n{}", stdout.trim(), stderr.trim());
    let text = text.trim();
    if text.is_empty() {
        format!("git exited with status: {}", output.status)
    } else {
        text.to_string()
    }
}
