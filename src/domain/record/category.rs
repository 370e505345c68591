//! Category items and the discovered category index

use std::collections::BTreeMap;

use super::{Record, RecordShape};
use crate::domain::error::InvalidCategoryName;

/// One entry of a category: a path and the name it is listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItemRecord {
    pub path: String,
    pub name: String,
}

impl CategoryItemRecord {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl Record for CategoryItemRecord {
    const SHAPE: RecordShape = RecordShape::exact(2);

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        Self {
            path: fields.next().unwrap_or_default(),
            name: fields.next().unwrap_or_default(),
        }
    }

    fn to_fields(&self) -> Vec<&str> {
        vec![&self.path, &self.name]
    }
}

/// Category name to its items, in file order. Rebuilt from disk on demand.
pub type CategoryIndex = BTreeMap<String, Vec<CategoryItemRecord>>;

/// Check that a category name can safely become a file name
pub fn validate_category_name(name: &str) -> Result<(), InvalidCategoryName> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');

    if invalid {
        return Err(InvalidCategoryName {
            name: name.to_string(),
        });
    }
    Ok(())
}
