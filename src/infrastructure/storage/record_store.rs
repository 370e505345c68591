//! Quoted-field line storage
//!
//! One record per line, every field wrapped in double quotes and separated
//! by whitespace: `"field1" "field2" "field3"`. Quotes inside a field are not
//! escaped, so such a field does not survive a round trip.

use std::io::{ErrorKind, SeekFrom};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use regex::Regex;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{trace, warn};

use super::StoreError;
use crate::domain::error::RecordParseError;
use crate::domain::record::{Record, RecordShape};

const FIELD: &str = r#""([^"]*)""#;

/// Build the line pattern for a record shape.
///
/// Required fields are mandatory, optional ones trail as non-capturing
/// optional groups. The pattern is unanchored: the first match in a line wins.
pub fn field_pattern(shape: RecordShape) -> String {
    let mut pattern = vec![FIELD; shape.required].join(r"\s+");
    for _ in 0..shape.optional {
        pattern.push_str(&format!(r"(?:\s+{})?", FIELD));
    }
    pattern
}

/// Backing file of one record kind
pub struct RecordStore<R> {
    path: PathBuf,
    pattern: Regex,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            path: path.into(),
            pattern: Regex::new(&field_pattern(R::SHAPE))?,
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Parse one line into a record
    pub fn parse_line(&self, line: &str) -> Result<R, RecordParseError> {
        let captures = self.pattern.captures(line).ok_or_else(|| RecordParseError {
            line: line.to_string(),
            expected: R::SHAPE.required,
        })?;

        let fields = (1..=R::SHAPE.max_fields())
            .map(|i| {
                captures
                    .get(i)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect();

        Ok(R::from_fields(fields))
    }

    /// Serialize a record to one line. Empty trailing optional fields are omitted.
    pub fn serialize(record: &R) -> String {
        let fields = record.to_fields();
        let mut len = fields.len();
        while len > R::SHAPE.required && fields[len - 1].is_empty() {
            len -= 1;
        }

        if fields.iter().any(|f| f.contains('"')) {
            warn!(?fields, "record field contains a quote and will not read back intact");
        }

        fields[..len]
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Read every parsable record in file order.
    ///
    /// A missing file reads as empty. Blank and unparsable lines are skipped.
    pub async fn read_all(&self) -> Result<Vec<R>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.read_error(e)),
        };

        let records = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match self.parse_line(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    trace!(path = %self.path.display(), error = %e, "skipping line");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    /// Overwrite the file with `records`, one per line.
    pub async fn write_all(&self, records: &[R]) -> Result<(), StoreError> {
        self.ensure_parent().await?;

        let data = records
            .iter()
            .map(Self::serialize)
            .collect::<Vec<_>>()
            .join("\n");

        fs::write(&self.path, data)
            .await
            .map_err(|e| self.write_error(e))
    }

    /// Append one record as a new line, creating the file if absent.
    pub async fn append_one(&self, record: &R) -> Result<(), StoreError> {
        self.ensure_parent().await?;

        let mut line = Self::serialize(record);
        if self.needs_separator().await? {
            line.insert(0, '\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.write_error(e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        file.flush().await.map_err(|e| self.write_error(e))
    }

    /// Create the file empty if it does not exist. Returns true if created.
    pub async fn touch(&self) -> Result<bool, StoreError> {
        if self.exists() {
            return Ok(false);
        }
        self.ensure_parent().await?;

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::Create {
                path: self.path.display().to_string(),
                source: e,
            })?;
        Ok(true)
    }

    /// Whether the file is non-empty and its last byte is not a newline
    async fn needs_separator(&self) -> Result<bool, StoreError> {
        let mut file = match fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(self.read_error(e)),
        };

        let len = file
            .metadata()
            .await
            .map_err(|e| self.read_error(e))?
            .len();
        if len == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .await
            .map_err(|e| self.read_error(e))?;
        file.read_exact(&mut last)
            .await
            .map_err(|e| self.read_error(e))?;

        Ok(last[0] != b'\n')
    }

    async fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Create {
                    path: parent.display().to_string(),
                    source: e,
                }),
            _ => Ok(()),
        }
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Move the record at `from` so that it ends up at `new_index`.
///
/// `new_index` is clamped to the last position.
pub(crate) fn relocate<R>(records: &mut Vec<R>, from: usize, new_index: usize) {
    if from >= records.len() {
        return;
    }
    let record = records.remove(from);
    let index = new_index.min(records.len());
    records.insert(index, record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{CategoryItemRecord, CommandRecord, ProjectRecord};
    use tempfile::TempDir;

    fn project_store(dir: &TempDir) -> RecordStore<ProjectRecord> {
        RecordStore::new(dir.path().join("config.txt")).unwrap()
    }

    #[test]
    fn pattern_for_exact_shape() {
        assert_eq!(
            field_pattern(RecordShape::exact(2)),
            r#""([^"]*)"\s+"([^"]*)""#
        );
    }

    #[test]
    fn pattern_for_optional_field() {
        assert_eq!(
            field_pattern(RecordShape::with_optional(2, 1)),
            r#""([^"]*)"\s+"([^"]*)"(?:\s+"([^"]*)")?"#
        );
    }

    #[test]
    fn parse_project_line() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        let record = store.parse_line(r#""/src/app" "code ." "App""#).unwrap();
        assert_eq!(record, ProjectRecord::new("/src/app", "code .", "App"));
    }

    #[test]
    fn parse_rejects_missing_field() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        let err = store.parse_line(r#""/src/app" "code .""#).unwrap_err();
        assert_eq!(err.expected, 3);
    }

    #[test]
    fn parse_command_with_and_without_identifier() {
        let store: RecordStore<CommandRecord> = RecordStore::new("/unused").unwrap();

        let with = store.parse_line(r#""VS Code" "code ." "vsc""#).unwrap();
        assert_eq!(with, CommandRecord::new("VS Code", "code .", "vsc"));

        let without = store.parse_line(r#""Shell" "bash""#).unwrap();
        assert_eq!(without, CommandRecord::new("Shell", "bash", ""));
    }

    #[test]
    fn round_trip_every_record_kind() {
        let projects: RecordStore<ProjectRecord> = RecordStore::new("/unused").unwrap();
        let project = ProjectRecord::new("C:\\work\\app", "npm run dev", "App | node");
        let line = RecordStore::serialize(&project);
        assert_eq!(projects.parse_line(&line).unwrap(), project);

        let commands: RecordStore<CommandRecord> = RecordStore::new("/unused").unwrap();
        for command in [
            CommandRecord::new("VS Code", "code .", "vsc"),
            CommandRecord::new("Shell", "bash", ""),
        ] {
            let line = RecordStore::serialize(&command);
            assert_eq!(commands.parse_line(&line).unwrap(), command);
        }

        let items: RecordStore<CategoryItemRecord> = RecordStore::new("/unused").unwrap();
        let item = CategoryItemRecord::new("/tmp/a b.txt", "Alpha");
        let line = RecordStore::serialize(&item);
        assert_eq!(items.parse_line(&line).unwrap(), item);
    }

    #[test]
    fn serialize_omits_empty_identifier() {
        let line = RecordStore::<CommandRecord>::serialize(&CommandRecord::new("Shell", "bash", ""));
        assert_eq!(line, r#""Shell" "bash""#);
    }

    #[test]
    fn serialize_keeps_empty_required_fields() {
        let line = RecordStore::<ProjectRecord>::serialize(&ProjectRecord::new("/p", "", "P"));
        assert_eq!(line, r#""/p" "" "P""#);
    }

    #[tokio::test]
    async fn read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_skips_malformed_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        let content = [
            r#""/a" "run a" "A""#,
            "",
            "this line is garbage",
            r#""/b" "run b" "B""#,
            "   ",
            r#""/c" "run c" "C""#,
        ]
        .join("\n");
        std::fs::write(store.path(), content).unwrap();

        let names: Vec<_> = store
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn read_handles_crlf() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        std::fs::write(store.path(), "\"/a\" \"x\" \"A\"\r\n\"/b\" \"y\" \"B\"\r\n").unwrap();
        assert_eq!(store.read_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn write_all_overwrites_and_joins_with_newline() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        std::fs::write(store.path(), "old content that goes away").unwrap();

        store
            .write_all(&[
                ProjectRecord::new("/a", "x", "A"),
                ProjectRecord::new("/b", "y", "B"),
            ])
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "\"/a\" \"x\" \"A\"\n\"/b\" \"y\" \"B\"");
    }

    #[tokio::test]
    async fn write_all_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<ProjectRecord> =
            RecordStore::new(dir.path().join("nested").join("config.txt")).unwrap();
        store.write_all(&[ProjectRecord::new("/a", "x", "A")]).await.unwrap();
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn append_creates_file_and_separates_lines() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<CategoryItemRecord> =
            RecordStore::new(dir.path().join("work.categorias.txt")).unwrap();

        store.append_one(&CategoryItemRecord::new("/a", "A")).await.unwrap();
        store.append_one(&CategoryItemRecord::new("/b", "B")).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "\"/a\" \"A\"\n\"/b\" \"B\"");
    }

    #[tokio::test]
    async fn append_after_trailing_newline_adds_no_blank_line() {
        let dir = TempDir::new().unwrap();
        let store: RecordStore<CategoryItemRecord> =
            RecordStore::new(dir.path().join("work.categorias.txt")).unwrap();
        std::fs::write(store.path(), "\"/a\" \"A\"\n").unwrap();

        store.append_one(&CategoryItemRecord::new("/b", "B")).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "\"/a\" \"A\"\n\"/b\" \"B\"");
    }

    #[tokio::test]
    async fn touch_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = project_store(&dir);
        assert!(store.touch().await.unwrap());
        std::fs::write(store.path(), "\"/a\" \"x\" \"A\"").unwrap();
        assert!(!store.touch().await.unwrap());
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }

    #[test]
    fn relocate_to_front() {
        let mut v = vec!["A", "B", "C"];
        relocate(&mut v, 1, 0);
        assert_eq!(v, vec!["B", "A", "C"]);
    }

    #[test]
    fn relocate_to_end() {
        let mut v = vec!["A", "B", "C"];
        relocate(&mut v, 0, 2);
        assert_eq!(v, vec!["B", "C", "A"]);
    }

    #[test]
    fn relocate_clamps_index() {
        let mut v = vec!["A", "B", "C"];
        relocate(&mut v, 0, 99);
        assert_eq!(v, vec!["B", "C", "A"]);
    }

    #[test]
    fn relocate_out_of_range_source_is_noop() {
        let mut v = vec!["A", "B"];
        relocate(&mut v, 5, 0);
        assert_eq!(v, vec!["A", "B"]);
    }
}
