//! Process executor and platform opener port interfaces

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from running external programs
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Failed to start command: {0}")]
    SpawnFailed(String),

    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },
}

/// Port for running shell commands
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Start `command` with `cwd` as working directory.
    ///
    /// Returns once the process has started; its completion is not awaited.
    async fn spawn(&self, command: &str, cwd: &Path) -> Result<(), ProcessError>;
}

/// Port for opening a path with the platform's default handler
#[async_trait]
pub trait PlatformOpener: Send + Sync {
    async fn open(&self, path: &Path) -> Result<(), ProcessError>;
}

/// Blanket implementation for boxed executors
#[async_trait]
impl ProcessExecutor for Box<dyn ProcessExecutor> {
    async fn spawn(&self, command: &str, cwd: &Path) -> Result<(), ProcessError> {
        self.as_ref().spawn(command, cwd).await
    }
}

/// Blanket implementation for boxed openers
#[async_trait]
impl PlatformOpener for Box<dyn PlatformOpener> {
    async fn open(&self, path: &Path) -> Result<(), ProcessError> {
        self.as_ref().open(path).await
    }
}
