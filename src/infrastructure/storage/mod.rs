//! File-backed record storage
//!
//! `RecordStore` handles the quoted-field line format; the registries give
//! each record kind its ordered CRUD operations. Nothing is cached: every
//! read parses the backing file again.

mod categories;
mod commands;
mod error;
mod projects;
mod record_store;

pub use categories::{CategoryRegistry, CATEGORY_FILE_SUFFIX};
pub use commands::{CommandRegistry, COMMANDS_FILE};
pub use error::StoreError;
pub use projects::{ProjectRegistry, PROJECTS_FILE};
pub use record_store::{field_pattern, RecordStore};

use std::path::{Path, PathBuf};

/// All registries rooted at one base directory
pub struct Catalog {
    pub projects: ProjectRegistry,
    pub commands: CommandRegistry,
    pub categories: CategoryRegistry,
    base_dir: PathBuf,
}

impl Catalog {
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        Ok(Self {
            projects: ProjectRegistry::new(&base_dir)?,
            commands: CommandRegistry::new(&base_dir)?,
            categories: CategoryRegistry::new(&base_dir),
            base_dir,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
