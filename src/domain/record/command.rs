//! Reusable launch commands

use super::{Record, RecordShape};

/// A named command that projects can be launched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub name: String,
    pub command: String,
    /// Short tag appended to project names created with this command; may be empty
    pub identifier: String,
}

impl CommandRecord {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            identifier: identifier.into(),
        }
    }

    /// Compose a project display name as `"<name> | <identifier>"`.
    ///
    /// Returns the name unchanged when the identifier is empty.
    pub fn decorate(&self, project_name: &str) -> String {
        if self.identifier.is_empty() {
            project_name.to_string()
        } else {
            format!("{} | {}", project_name, self.identifier)
        }
    }
}

impl Record for CommandRecord {
    const SHAPE: RecordShape = RecordShape::with_optional(2, 1);

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        Self {
            name: fields.next().unwrap_or_default(),
            command: fields.next().unwrap_or_default(),
            identifier: fields.next().unwrap_or_default(),
        }
    }

    fn to_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.command, &self.identifier]
    }
}
