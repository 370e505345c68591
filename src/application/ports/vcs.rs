//! Version control port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Version control errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
    #[error("git not found. Please install git.")]
    ToolNotFound,

    #[error("Failed to stage changes: {0}")]
    StageFailed(String),

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("Failed to commit: {0}")]
    CommitFailed(String),
}

/// Port for a version control tool
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stage every change under `dir`.
    async fn stage_all(&self, dir: &Path) -> Result<(), VcsError>;

    /// Commit staged changes in the repository containing `dir`.
    ///
    /// Returns `VcsError::NothingToCommit` when nothing was staged.
    async fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError>;
}

/// Blanket implementation for boxed version control types
#[async_trait]
impl VersionControl for Box<dyn VersionControl> {
    async fn stage_all(&self, dir: &Path) -> Result<(), VcsError> {
        self.as_ref().stage_all(dir).await
    }

    async fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.as_ref().commit(dir, message).await
    }
}
