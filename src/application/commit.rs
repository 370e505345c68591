//! Auto-commit use case
//!
//! Stage everything in a directory, then commit it. Each change event is
//! handled on its own: no retries, no rollback.

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::ports::{VcsError, VersionControl};

/// Commit message used for a change in `file_name`
pub fn commit_message(file_name: &str) -> String {
    format!("auto-commit: changes in {}", file_name)
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Nothing was staged; informational only
    NothingToCommit,
    /// Staging failed, so no commit was attempted
    StageFailed(VcsError),
    CommitFailed(VcsError),
}

impl CommitOutcome {
    /// True for outcomes that should be reported as errors
    pub fn is_error(&self) -> bool {
        matches!(self, Self::StageFailed(_) | Self::CommitFailed(_))
    }
}

impl fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed => write!(f, "committed"),
            Self::NothingToCommit => write!(f, "nothing to commit"),
            Self::StageFailed(e) | Self::CommitFailed(e) => write!(f, "{}", e),
        }
    }
}

/// Stage-then-commit pipeline over a version control port
pub struct CommitPipeline<V: VersionControl> {
    vcs: V,
}

impl<V: VersionControl> CommitPipeline<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    /// Commit every change under `directory`, naming `file_name` in the message.
    pub async fn commit(&self, directory: &Path, file_name: &str) -> CommitOutcome {
        if let Err(e) = self.vcs.stage_all(directory).await {
            debug!(dir = %directory.display(), error = %e, "staging failed");
            return CommitOutcome::StageFailed(e);
        }

        let outcome = match self.vcs.commit(directory, &commit_message(file_name)).await {
            Ok(()) => CommitOutcome::Committed,
            Err(VcsError::NothingToCommit) => CommitOutcome::NothingToCommit,
            Err(e) => CommitOutcome::CommitFailed(e),
        };
        debug!(dir = %directory.display(), file = file_name, %outcome, "commit pipeline finished");
        outcome
    }
}
