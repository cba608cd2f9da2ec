//! Append-only sinks for per-cell multiplication records.
//!
//! Every computed output cell produces one [`CellRecord`]. The production
//! sink appends records as text lines to a shared log file; concurrent
//! appends are serialized through a single mutex-guarded handle, so no two
//! records ever interleave. OS-level append atomicity is not relied on.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use gridmul_common::{GridmulError, Result};

/// One computed output cell: row index, column index, value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRecord {
    pub row: usize,
    pub col: usize,
    pub value: i64,
}

impl CellRecord {
    /// Parse a record from one log line.
    ///
    /// Returns `None` for anything other than exactly three integer tokens.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        let value = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { row, col, value })
    }
}

impl fmt::Display for CellRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.row, self.col, self.value)
    }
}

/// Consumer of per-cell records.
///
/// `append` is called concurrently from every pool worker; implementations
/// must make each append atomic with respect to the others.
pub trait CellSink: Send + Sync {
    /// Record one computed cell.
    fn append(&self, record: &CellRecord) -> Result<()>;
}

/// File-backed sink appending one `"<row> <col> <value>"` line per record.
///
/// The file is opened lazily in append mode on the first record, so a sink
/// over a log that is never written leaves no file behind.
#[derive(Debug)]
pub struct FileCellSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileCellSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), file: Mutex::new(None) }
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete any existing log so the next append starts an empty file.
    ///
    /// Drops the open handle first; a log that does not exist yet is not an
    /// error.
    pub fn reset(&self) -> Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| GridmulError::Worker("cell sink mutex poisoned".to_string()))?;
        *guard = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CellSink for FileCellSink {
    fn append(&self, record: &CellRecord) -> Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| GridmulError::Worker("cell sink mutex poisoned".to_string()))?;
        if guard.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            *guard = Some(file);
        }
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{record}")?;
        }
        Ok(())
    }
}

/// In-memory sink collecting records, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemoryCellSink {
    records: Mutex<Vec<CellRecord>>,
}

impl MemoryCellSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records appended so far, in append order.
    pub fn snapshot(&self) -> Vec<CellRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of records appended so far.
    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl CellSink for MemoryCellSink {
    fn append(&self, record: &CellRecord) -> Result<()> {
        if let Ok(mut records) = self.records.lock() {
            records.push(*record);
        }
        Ok(())
    }
}
