//! File and directory change watching
//!
//! Files are polled for modification time changes; directories use a
//! recursive debounced watcher. At most one observer exists per canonical
//! path: registering a path again replaces its observer.

use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use notify_debouncer_full::{
    new_debouncer,
    notify::{EventKind, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

/// Quiet period before a burst of directory events is delivered
pub const DIRECTORY_DEBOUNCE: Duration = Duration::from_millis(500);

/// Version control metadata directory, never reported
const VCS_DIR: &str = ".git";

/// A detected change: which directory to commit in and what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub directory: PathBuf,
    /// File name, relative to `directory`
    pub file_name: String,
}

/// Called from a background task or watcher thread for every change
pub type ChangeCallback = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Cannot watch {0}: path not found")]
    NotFound(String),

    #[error("Watcher failed: {0}")]
    Backend(String),
}

/// Whether a registration created a new observer or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchRegistration {
    Added,
    Replaced,
}

enum Observer {
    Poll(JoinHandle<()>),
    Recursive(Debouncer<RecommendedWatcher, RecommendedCache>),
}

impl Drop for Observer {
    fn drop(&mut self) {
        // dropping a debouncer stops it on its own
        if let Self::Poll(handle) = self {
            handle.abort();
        }
    }
}

/// Registry of active watches, keyed by canonical path
pub struct ChangeWatcher {
    poll_interval: Duration,
    observers: Mutex<HashMap<PathBuf, Observer>>,
}

impl ChangeWatcher {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            observers: Mutex::new(HashMap::new()),
        }
    }

    /// Watch a directory recursively, or a file by polling
    pub async fn watch(
        &self,
        path: &Path,
        on_change: ChangeCallback,
    ) -> Result<WatchRegistration, WatchError> {
        if path.is_dir() {
            self.watch_directory(path, on_change).await
        } else {
            self.watch_file(path, on_change).await
        }
    }

    /// Poll `path`'s modification time and report every change.
    ///
    /// The first successful lookup is the baseline. A path that does not
    /// exist yet is polled until it does.
    pub async fn watch_file(
        &self,
        path: &Path,
        on_change: ChangeCallback,
    ) -> Result<WatchRegistration, WatchError> {
        let key = watch_key(path);
        let directory = key
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| key.clone());
        let file_name = key
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let watched = key.clone();
        let interval = self.poll_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<SystemTime> = None;

            loop {
                ticker.tick().await;
                let current = match modified_time(&watched).await {
                    Ok(time) => time,
                    Err(e) => {
                        trace!(path = %watched.display(), error = %e, "poll lookup failed");
                        continue;
                    }
                };

                if last.is_some_and(|previous| previous != current) {
                    debug!(path = %watched.display(), "file changed");
                    on_change(ChangeEvent {
                        directory: directory.clone(),
                        file_name: file_name.clone(),
                    });
                }
                last = Some(current);
            }
        });

        Ok(self.install(key, Observer::Poll(handle)).await)
    }

    /// Watch `dir` recursively and report each changed path once per burst.
    pub async fn watch_directory(
        &self,
        dir: &Path,
        on_change: ChangeCallback,
    ) -> Result<WatchRegistration, WatchError> {
        let key = std::fs::canonicalize(dir)
            .map_err(|_| WatchError::NotFound(dir.display().to_string()))?;

        let root = key.clone();
        let mut debouncer = new_debouncer(
            DIRECTORY_DEBOUNCE,
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    let mut changed = BTreeSet::new();
                    for event in events {
                        if !matches!(
                            event.kind,
                            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                        ) {
                            continue;
                        }
                        for path in &event.paths {
                            if let Some(relative) = relative_change(&root, path) {
                                changed.insert(relative);
                            }
                        }
                    }

                    for file_name in changed {
                        debug!(dir = %root.display(), file = %file_name, "directory changed");
                        on_change(ChangeEvent {
                            directory: root.clone(),
                            file_name,
                        });
                    }
                }
                Err(errors) => {
                    for e in errors {
                        warn!(error = %e, "directory watcher error");
                    }
                }
            },
        )
        .map_err(|e| WatchError::Backend(e.to_string()))?;

        debouncer
            .watch(&key, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Backend(e.to_string()))?;

        Ok(self.install(key, Observer::Recursive(debouncer)).await)
    }

    /// Stop watching `path`. Returns whether a watch existed.
    pub async fn unwatch(&self, path: &Path) -> bool {
        self.observers.lock().await.remove(&watch_key(path)).is_some()
    }

    pub async fn is_watching(&self, path: &Path) -> bool {
        self.observers.lock().await.contains_key(&watch_key(path))
    }

    pub async fn active_count(&self) -> usize {
        self.observers.lock().await.len()
    }

    async fn install(&self, key: PathBuf, observer: Observer) -> WatchRegistration {
        let mut observers = self.observers.lock().await;
        let registration = match observers.insert(key.clone(), observer) {
            Some(previous) => {
                drop(previous);
                WatchRegistration::Replaced
            }
            None => WatchRegistration::Added,
        };
        debug!(path = %key.display(), ?registration, "watch registered");
        registration
    }
}

/// Canonical path if it exists, absolute path otherwise
fn watch_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

async fn modified_time(path: &Path) -> std::io::Result<SystemTime> {
    tokio::fs::metadata(path).await?.modified()
}

/// Path of a change relative to the watched root.
///
/// `None` for the root itself, for paths outside it and for anything inside
/// a `.git` directory.
fn relative_change(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    let in_vcs_dir = relative
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name == VCS_DIR));
    if in_vcs_dir {
        return None;
    }
    Some(relative.to_string_lossy().into_owned())
}
