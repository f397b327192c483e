//! Snapshot store: the single CSV file handed off from the fetcher to the
//! server.
//!
//! The two processes never talk to each other; the snapshot is the only
//! shared state. Writes go to a temporary path and are renamed into place
//! so a concurrent reader sees either the fully-old or fully-new file,
//! never a truncated one.

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::errors::SnapshotError;
use crate::observations::SnapshotRow;

/// Narrow interface over snapshot persistence so the fetcher and server
/// can be exercised against an in-memory store in tests.
pub trait SnapshotStore: Send + Sync {
    fn write(&self, rows: &[SnapshotRow]) -> Result<(), SnapshotError>;
    fn read(&self) -> Result<Vec<SnapshotRow>, SnapshotError>;
}

/// CSV-backed store. Header row, canonical column order, no index
/// column. Quoting is type-based: string columns are always quoted,
/// numeric columns never, so the stringified user key reads as
/// categorical in the file even though its content looks numeric.
#[derive(Debug, Clone)]
pub struct CsvSnapshotStore {
    path: PathBuf,
}

impl CsvSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

/// Quote a string-typed field unconditionally, doubling embedded quotes.
///
/// `csv`'s `QuoteStyle::NonNumeric` decides by field content, which would
/// leave the stringified user key bare; quoting here is by column type,
/// matching the published file format.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

impl SnapshotStore for CsvSnapshotStore {
    fn write(&self, rows: &[SnapshotRow]) -> Result<(), SnapshotError> {
        let temp_path = self.temp_path();

        {
            // Fields are pre-quoted above; the writer must not re-quote
            let mut writer = WriterBuilder::new()
                .quote_style(QuoteStyle::Never)
                .from_path(&temp_path)?;
            writer.write_record(
                [
                    "id",
                    "user",
                    "published_at",
                    "type",
                    "hedonic_tone",
                    "intensity",
                    "latitude",
                    "longitude",
                ]
                .map(quoted),
            )?;
            for row in rows {
                writer.write_record([
                    row.id.to_string(),
                    quoted(&row.user),
                    quoted(&row.published_at),
                    quoted(&row.odour_type),
                    quoted(&row.hedonic_tone),
                    quoted(&row.intensity),
                    row.latitude.to_string(),
                    row.longitude.to_string(),
                ])?;
            }
            writer.flush()?;
        }

        // Atomic replace; a concurrent reader never observes a partial file
        fs::rename(&temp_path, &self.path)?;
        info!("Wrote {} rows to snapshot {}", rows.len(), self.path.display());

        Ok(())
    }

    fn read(&self) -> Result<Vec<SnapshotRow>, SnapshotError> {
        if !self.path.exists() {
            return Err(SnapshotError::Missing {
                path: self.path.display().to_string(),
            });
        }

        let mut reader = ReaderBuilder::new().from_path(&self.path)?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        Ok(rows)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    rows: Mutex<Option<Vec<SnapshotRow>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn write(&self, rows: &[SnapshotRow]) -> Result<(), SnapshotError> {
        *self.rows.lock().unwrap() = Some(rows.to_vec());
        Ok(())
    }

    fn read(&self) -> Result<Vec<SnapshotRow>, SnapshotError> {
        self.rows
            .lock()
            .unwrap()
            .clone()
            .ok_or(SnapshotError::Missing {
                path: "<memory>".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<SnapshotRow> {
        vec![
            SnapshotRow {
                id: 42,
                user: "7".to_string(),
                published_at: "2022-04-24T13:43:43.893254Z".to_string(),
                category: String::new(),
                odour_type: "Rotten eggs".to_string(),
                hedonic_tone: "Neutral".to_string(),
                intensity: "Weak".to_string(),
                latitude: 41.5,
                longitude: 2.2,
            },
            SnapshotRow {
                id: 43,
                user: "8".to_string(),
                published_at: "2022-04-25T09:12:00.000000Z".to_string(),
                category: String::new(),
                odour_type: "Traffic".to_string(),
                hedonic_tone: "Unpleasant".to_string(),
                intensity: "Strong".to_string(),
                latitude: 41.4,
                longitude: 2.1,
            },
        ]
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvSnapshotStore::new(dir.path().join("odourcollect.csv"));

        let rows = sample_rows();
        store.write(&rows).unwrap();
        let read_back = store.read().unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odourcollect.csv");
        let store = CsvSnapshotStore::new(&path);
        store.write(&sample_rows()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"id\",\"user\",\"published_at\",\"type\",\"hedonic_tone\",\"intensity\",\"latitude\",\"longitude\""
        );
        // String columns are always quoted, the numeric-looking user key
        // included; numeric columns never are
        let first = lines.next().unwrap();
        assert!(
            first.starts_with("42,\"7\",\"2022-04-24T13:43:43.893254Z\",\"Rotten eggs\""),
            "unexpected row: {}",
            first
        );
        assert!(first.ends_with("41.5,2.2"));
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvSnapshotStore::new(dir.path().join("odourcollect.csv"));

        store.write(&sample_rows()).unwrap();
        store.write(&sample_rows()[..1]).unwrap();

        assert_eq!(store.read().unwrap().len(), 1);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_read_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvSnapshotStore::new(dir.path().join("absent.csv"));
        assert!(matches!(store.read(), Err(SnapshotError::Missing { .. })));
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySnapshotStore::new();
        assert!(matches!(store.read(), Err(SnapshotError::Missing { .. })));
        store.write(&sample_rows()).unwrap();
        assert_eq!(store.read().unwrap().len(), 2);
    }
}
