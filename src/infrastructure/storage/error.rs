//! Storage error types

use std::io;

use thiserror::Error;

use crate::domain::error::InvalidCategoryName;

/// Errors from reading or writing backing files
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    /// A full-file rewrite or append failed
    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("Failed to create {path}: {source}")]
    Create { path: String, source: io::Error },

    #[error("Cannot resolve current directory: {0}")]
    CurrentDir(io::Error),

    #[error("Invalid record pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategoryName),

    #[error("Invalid file name: \"{0}\"")]
    InvalidFileName(String),
}
