//! Domain error types

use thiserror::Error;

/// Error when a stored line does not match its record's quoted-field pattern.
///
/// Never surfaced to the user: readers drop the line and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line does not match a {expected}-field record: {line:?}")]
pub struct RecordParseError {
    pub line: String,
    pub expected: usize,
}

/// Error when a category name cannot be mapped to a backing file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid category name: \"{name}\". Names must be non-empty and cannot contain path separators")]
pub struct InvalidCategoryName {
    pub name: String,
}

/// Error when a project's modification time cannot be looked up.
///
/// The project stays listed with the oldest possible timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot read modification time of {path}: {message}")]
pub struct StatLookupError {
    pub path: String,
    pub message: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
