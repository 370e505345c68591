//! Auto-commit worker
//!
//! Watch callbacks only enqueue change events; a single task drains the
//! queue so git never runs twice at once in the same session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::presenter::Presenter;
use crate::application::ports::VersionControl;
use crate::application::{CommitOutcome, CommitPipeline};
use crate::infrastructure::watch::{ChangeCallback, ChangeEvent};

/// Start the worker. Without a pipeline, changes are only reported.
///
/// Returns the callback to hand to watches and the worker task. The task
/// ends once every clone of the callback has been dropped.
pub fn spawn_commit_worker<V>(
    pipeline: Option<CommitPipeline<V>>,
    presenter: Presenter,
) -> (ChangeCallback, JoinHandle<()>)
where
    V: VersionControl + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<ChangeEvent>();

    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let changed = event.directory.join(&event.file_name);
            presenter.watch_event(&format!("Change detected: {}", changed.display()));

            let Some(pipeline) = &pipeline else {
                continue;
            };
            match pipeline.commit(&event.directory, &event.file_name).await {
                CommitOutcome::Committed => {
                    presenter.success(&format!("Committed changes in {}", event.file_name))
                }
                CommitOutcome::NothingToCommit => presenter.info(&format!(
                    "Nothing to commit for {}",
                    event.file_name
                )),
                failed => presenter.error(&format!(
                    "Auto-commit of {} failed: {}",
                    event.file_name, failed
                )),
            }
        }
        debug!("commit worker stopped");
    });

    let callback: ChangeCallback = Arc::new(move |event: ChangeEvent| {
        if tx.send(event).is_err() {
            debug!("commit worker gone, dropping change event");
        }
    });

    (callback, handle)
}
