//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting.
///
/// Status lines go to stderr so they can interleave with prompts and
/// background watcher output; listings go to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one numbered entry of a listing
    pub fn list_item(&self, position: usize, text: &str) {
        println!("{} {}", format!("{:>3}.", position).dimmed(), text);
    }

    /// Print a watcher event line
    pub fn watch_event(&self, message: &str) {
        eprintln!("{} {}", "●".cyan(), message);
    }
}
