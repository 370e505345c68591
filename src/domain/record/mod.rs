//! Persisted record kinds
//!
//! Every record is an ordered tuple of string fields. The storage layer
//! only sees fields; these types give them names.

mod category;
mod command;
mod project;

pub use category::{validate_category_name, CategoryIndex, CategoryItemRecord};
pub use command::CommandRecord;
pub use project::{display_labels, sort_by_recency, ProjectEntry, ProjectRecord};

/// How many quoted fields a record line carries.
///
/// `optional` fields trail the required ones and may be absent on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
    pub required: usize,
    pub optional: usize,
}

impl RecordShape {
    pub const fn exact(required: usize) -> Self {
        Self {
            required,
            optional: 0,
        }
    }

    pub const fn with_optional(required: usize, optional: usize) -> Self {
        Self { required, optional }
    }

    pub const fn max_fields(&self) -> usize {
        self.required + self.optional
    }
}

/// A record that can be stored as one quoted-field line.
pub trait Record: Sized + Clone + PartialEq {
    const SHAPE: RecordShape;

    /// Build the record from parsed fields.
    ///
    /// `fields` always holds `SHAPE.max_fields()` entries; absent optional
    /// fields arrive as empty strings.
    fn from_fields(fields: Vec<String>) -> Self;

    /// Fields in on-disk order.
    fn to_fields(&self) -> Vec<&str>;
}
