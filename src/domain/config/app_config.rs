//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default poll period for file watches
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Accepted poll period range
pub const MIN_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the projects, commands and category files
    pub base_dir: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub auto_commit: Option<bool>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// `base_dir` stays unset; its default depends on the platform and is
    /// resolved by the caller.
    pub fn defaults() -> Self {
        Self {
            base_dir: None,
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            auto_commit: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            base_dir: other.base_dir.or(self.base_dir),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            auto_commit: other.auto_commit.or(self.auto_commit),
        }
    }

    /// Base directory, or the result of `fallback` if not set or blank
    pub fn base_dir_or_else(&self, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
        self.base_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(fallback)
    }

    /// Poll interval, or the default if not set or out of range
    pub fn poll_interval_or_default(&self) -> Duration {
        let ms = self
            .poll_interval_ms
            .filter(|ms| (MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(ms))
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        Duration::from_millis(ms)
    }

    /// Get auto-commit setting, or true if not set
    pub fn auto_commit_or_default(&self) -> bool {
        self.auto_commit.unwrap_or(true)
    }
}
