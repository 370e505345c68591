//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod process;
pub mod prompt;
pub mod vcs;

// Re-export common types
pub use config::ConfigStore;
pub use process::{PlatformOpener, ProcessError, ProcessExecutor};
pub use prompt::{Answer, PromptError, PromptProvider, Question};
pub use vcs::{VcsError, VersionControl};
