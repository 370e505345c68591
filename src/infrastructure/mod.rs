//! Infrastructure layer - Adapter implementations
//!
//! Contains the record files, change watching and concrete implementations
//! of the port interfaces (git, shell, desktop opener, terminal prompts).

pub mod config;
pub mod process;
pub mod prompt;
pub mod storage;
pub mod vcs;
pub mod watch;

// Re-export adapters
pub use config::{default_base_dir, XdgConfigStore};
pub use process::{ShellExecutor, SystemOpener};
pub use prompt::InquirePrompt;
pub use storage::Catalog;
pub use vcs::GitCli;
pub use watch::ChangeWatcher;
