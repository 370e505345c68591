//! Project registry backed by `config.txt`

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::record_store::{relocate, RecordStore};
use super::StoreError;
use crate::domain::error::StatLookupError;
use crate::domain::record::{ProjectEntry, ProjectRecord};

/// File name of the project list inside the base directory
pub const PROJECTS_FILE: &str = "config.txt";

/// Ordered project list. Every call re-reads the backing file.
pub struct ProjectRegistry {
    store: RecordStore<ProjectRecord>,
}

impl ProjectRegistry {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            store: RecordStore::new(base_dir.as_ref().join(PROJECTS_FILE))?,
        })
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Stored records in file order
    pub async fn records(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.store.read_all().await
    }

    /// Stored records with their modification times.
    ///
    /// A failed lookup keeps the project and carries the error instead of a time.
    pub async fn list(&self) -> Result<Vec<ProjectEntry>, StoreError> {
        let records = self.records().await?;
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            let modified = match fs::metadata(&record.path).await.and_then(|m| m.modified()) {
                Ok(time) => Ok(time),
                Err(e) => {
                    debug!(path = %record.path, error = %e, "modification time lookup failed");
                    Err(StatLookupError {
                        path: record.path.clone(),
                        message: e.to_string(),
                    })
                }
            };
            entries.push(ProjectEntry { record, modified });
        }

        Ok(entries)
    }

    /// Add a project at the end of the list.
    ///
    /// A path of `.` is stored as the current working directory.
    pub async fn add(
        &self,
        path: &str,
        command: &str,
        name: &str,
    ) -> Result<ProjectRecord, StoreError> {
        let record = ProjectRecord::new(resolve_path(path)?, command, name);

        let mut records = self.records().await?;
        records.push(record.clone());
        self.store.write_all(&records).await?;

        Ok(record)
    }

    /// Remove the first project equal to `target`. Returns whether one was removed.
    pub async fn remove(&self, target: &ProjectRecord) -> Result<bool, StoreError> {
        let mut records = self.records().await?;
        let Some(position) = records.iter().position(|r| r == target) else {
            return Ok(false);
        };

        records.remove(position);
        self.store.write_all(&records).await?;
        Ok(true)
    }

    /// Move the first project equal to `target` to `new_index`.
    /// Returns whether it was found.
    pub async fn move_to(
        &self,
        target: &ProjectRecord,
        new_index: usize,
    ) -> Result<bool, StoreError> {
        let mut records = self.records().await?;
        let Some(position) = records.iter().position(|r| r == target) else {
            return Ok(false);
        };

        relocate(&mut records, position, new_index);
        self.store.write_all(&records).await?;
        Ok(true)
    }
}

/// Resolve `.` to the current working directory
fn resolve_path(path: &str) -> Result<String, StoreError> {
    if path.trim() == "." {
        let cwd: PathBuf = std::env::current_dir().map_err(StoreError::CurrentDir)?;
        return Ok(cwd.to_string_lossy().into_owned());
    }
    Ok(path.to_string())
}
