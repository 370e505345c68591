//! Category registry
//!
//! Each category is one `<name>.categorias.txt` file in the base directory.
//! A category exists exactly when its file exists, even if empty. Files
//! created through a category live in a subdirectory named after it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tracing::debug;

use super::record_store::{relocate, RecordStore};
use super::StoreError;
use crate::domain::record::{validate_category_name, CategoryIndex, CategoryItemRecord};

/// Suffix that marks a file as a category
pub const CATEGORY_FILE_SUFFIX: &str = ".categorias.txt";

pub struct CategoryRegistry {
    base_dir: PathBuf,
}

impl CategoryRegistry {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Backing file of a category
    pub fn category_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}{}", name, CATEGORY_FILE_SUFFIX))
    }

    fn store(&self, name: &str) -> Result<RecordStore<CategoryItemRecord>, StoreError> {
        validate_category_name(name)?;
        RecordStore::new(self.category_path(name))
    }

    /// Category names found in the base directory, sorted
    pub async fn names(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.base_dir.display().to_string(),
                    source: e,
                })
            }
        };

        let mut names = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(StoreError::Read {
                        path: self.base_dir.display().to_string(),
                        source: e,
                    })
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(name) = file_name.strip_suffix(CATEGORY_FILE_SUFFIX) else {
                continue;
            };
            if !entry.path().is_file() {
                continue;
            }
            if let Err(e) = validate_category_name(name) {
                debug!(file = %file_name, "skipping category file: {}", e);
                continue;
            }
            names.push(name.to_string());
        }

        names.sort();
        Ok(names)
    }

    /// Rebuild the full category index from disk
    pub async fn discover(&self) -> Result<CategoryIndex, StoreError> {
        let mut index = CategoryIndex::new();
        for name in self.names().await? {
            let items = self.items(&name).await?;
            index.insert(name, items);
        }
        debug!(categories = index.len(), "discovered categories");
        Ok(index)
    }

    /// Items of one category in file order. Unknown categories read as empty.
    pub async fn items(&self, category: &str) -> Result<Vec<CategoryItemRecord>, StoreError> {
        self.store(category)?.read_all().await
    }

    pub fn exists(&self, category: &str) -> bool {
        self.category_path(category).is_file()
    }

    /// Create an empty category. Returns false if it already existed.
    pub async fn create_category(&self, name: &str) -> Result<bool, StoreError> {
        self.store(name)?.touch().await
    }

    /// Append an item to a category without rewriting the file
    pub async fn add_item(
        &self,
        category: &str,
        path: &str,
        name: &str,
    ) -> Result<CategoryItemRecord, StoreError> {
        let record = CategoryItemRecord::new(path, name);
        self.store(category)?.append_one(&record).await?;
        Ok(record)
    }

    /// Remove every item called `name`. Returns how many were removed.
    pub async fn remove_item(&self, category: &str, name: &str) -> Result<usize, StoreError> {
        let store = self.store(category)?;
        let mut items = store.read_all().await?;
        let before = items.len();

        items.retain(|item| item.name != name);
        let removed = before - items.len();
        if removed > 0 {
            store.write_all(&items).await?;
        }
        Ok(removed)
    }

    /// Move the first item called `name` to `new_index`. Returns whether it was found.
    pub async fn move_item(
        &self,
        category: &str,
        name: &str,
        new_index: usize,
    ) -> Result<bool, StoreError> {
        let store = self.store(category)?;
        let mut items = store.read_all().await?;
        let Some(position) = items.iter().position(|item| item.name == name) else {
            return Ok(false);
        };

        relocate(&mut items, position, new_index);
        store.write_all(&items).await?;
        Ok(true)
    }

    /// Create an empty file in the category's folder and list it in the category.
    ///
    /// An existing file with the same name is kept as is.
    pub async fn create_file_in_category(
        &self,
        file_name: &str,
        category: &str,
    ) -> Result<PathBuf, StoreError> {
        validate_category_name(category)?;
        validate_file_name(file_name)?;

        let dir = self.base_dir.join(category);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Create {
                path: dir.display().to_string(),
                source: e,
            })?;

        let file_path = dir.join(file_name);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .map_err(|e| StoreError::Create {
                path: file_path.display().to_string(),
                source: e,
            })?;

        let file_path = std::path::absolute(&file_path).unwrap_or(file_path);
        self.add_item(category, &file_path.to_string_lossy(), file_name)
            .await?;

        Ok(file_path)
    }
}

fn validate_file_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidFileName(name.to_string()));
    }
    Ok(())
}
