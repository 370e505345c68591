//! Command registry backed by `commands.txt`

use std::path::Path;

use super::record_store::RecordStore;
use super::StoreError;
use crate::domain::record::CommandRecord;

/// File name of the command list inside the base directory
pub const COMMANDS_FILE: &str = "commands.txt";

pub struct CommandRegistry {
    store: RecordStore<CommandRecord>,
}

impl CommandRegistry {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            store: RecordStore::new(base_dir.as_ref().join(COMMANDS_FILE))?,
        })
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn list(&self) -> Result<Vec<CommandRecord>, StoreError> {
        self.store.read_all().await
    }

    /// First command with the given name
    pub async fn find(&self, name: &str) -> Result<Option<CommandRecord>, StoreError> {
        Ok(self.list().await?.into_iter().find(|c| c.name == name))
    }

    pub async fn add(
        &self,
        name: &str,
        command: &str,
        identifier: &str,
    ) -> Result<CommandRecord, StoreError> {
        let record = CommandRecord::new(name, command, identifier);

        let mut records = self.list().await?;
        records.push(record.clone());
        self.store.write_all(&records).await?;

        Ok(record)
    }

    /// Remove the first command equal to `target`
    pub async fn remove(&self, target: &CommandRecord) -> Result<bool, StoreError> {
        let mut records = self.list().await?;
        let Some(position) = records.iter().position(|r| r == target) else {
            return Ok(false);
        };

        records.remove(position);
        self.store.write_all(&records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn add_and_list() {
        let dir = TempDir::new().unwrap();
        let registry = CommandRegistry::new(dir.path()).unwrap();

        registry.add("VS Code", "code .", "vsc").await.unwrap();
        registry.add("Shell", "bash", "").await.unwrap();

        let commands = registry.list().await.unwrap();
        assert_eq!(
            commands,
            vec![
                CommandRecord::new("VS Code", "code .", "vsc"),
                CommandRecord::new("Shell", "bash", ""),
            ]
        );
    }

    #[tokio::test]
    async fn empty_identifier_is_not_written() {
        let dir = TempDir::new().unwrap();
        let registry = CommandRegistry::new(dir.path()).unwrap();
        registry.add("Shell", "bash", "").await.unwrap();

        let content = std::fs::read_to_string(registry.path()).unwrap();
        assert_eq!(content, r#""Shell" "bash""#);
    }

    #[tokio::test]
    async fn find_by_name() {
        let dir = TempDir::new().unwrap();
        let registry = CommandRegistry::new(dir.path()).unwrap();
        registry.add("Shell", "bash", "sh").await.unwrap();

        let found = registry.find("Shell").await.unwrap().unwrap();
        assert_eq!(found.identifier, "sh");
        assert!(registry.find("Nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_by_value() {
        let dir = TempDir::new().unwrap();
        let registry = CommandRegistry::new(dir.path()).unwrap();
        registry.add("A", "a", "").await.unwrap();
        registry.add("B", "b", "").await.unwrap();

        assert!(registry.remove(&CommandRecord::new("A", "a", "")).await.unwrap());
        assert_eq!(registry.list().await.unwrap().len(), 1);
        assert!(!registry.remove(&CommandRecord::new("A", "a", "")).await.unwrap());
    }
}
