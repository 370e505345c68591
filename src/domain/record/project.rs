//! Project records and their listing presentation

use std::time::{SystemTime, UNIX_EPOCH};

use super::{Record, RecordShape};
use crate::domain::elapsed::Elapsed;
use crate::domain::error::StatLookupError;

/// A cataloged project: where it lives and how to launch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub path: String,
    pub command: String,
    pub name: String,
}

impl ProjectRecord {
    pub fn new(
        path: impl Into<String>,
        command: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            command: command.into(),
            name: name.into(),
        }
    }
}

impl Record for ProjectRecord {
    const SHAPE: RecordShape = RecordShape::exact(3);

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        Self {
            path: fields.next().unwrap_or_default(),
            command: fields.next().unwrap_or_default(),
            name: fields.next().unwrap_or_default(),
        }
    }

    fn to_fields(&self) -> Vec<&str> {
        vec![&self.path, &self.command, &self.name]
    }
}

/// A project as listed: the stored record plus its derived modification time.
#[derive(Debug, Clone)]
pub struct ProjectEntry {
    pub record: ProjectRecord,
    pub modified: Result<SystemTime, StatLookupError>,
}

impl ProjectEntry {
    /// Modification time, or the epoch when the lookup failed
    pub fn modified_or_epoch(&self) -> SystemTime {
        self.modified.as_ref().copied().unwrap_or(UNIX_EPOCH)
    }
}

/// Sort entries newest first. Ties keep their stored order.
pub fn sort_by_recency(entries: &mut [ProjectEntry]) {
    entries.sort_by(|a, b| b.modified_or_epoch().cmp(&a.modified_or_epoch()));
}

/// Menu labels for a set of entries, names padded to a common width.
pub fn display_labels(entries: &[ProjectEntry], now: SystemTime) -> Vec<String> {
    let width = entries
        .iter()
        .map(|e| e.record.name.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| match &entry.modified {
            Ok(modified) => {
                let elapsed = Elapsed::between(*modified, now);
                format!("{:<width$} | {} ago", entry.record.name, elapsed)
            }
            Err(_) => format!("{:<width$} | modified time unavailable", entry.record.name),
        })
        .collect()
}
