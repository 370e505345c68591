//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the interactive menu
//! navigator, the auto-commit worker and the session runner.

pub mod app;
pub mod args;
pub mod commit_worker;
pub mod config_cmd;
pub mod navigator;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_interactive, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, LaunchOptions};
pub use navigator::MenuNavigator;
pub use presenter::Presenter;
