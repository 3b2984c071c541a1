//! Persistence of the memo table.
//!
//! The table is stored as a single JSON object mapping each 9-character
//! board to `[score, best_move_index]`. Saves go through a temporary file in
//! the same directory and a rename, so readers never see a partial table.

use super::table::MemoTable;
use crate::games::tictactoe::Position;
use derive_more::{Display, Error};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// Memo store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Memo store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed memo table: {}", err))
    }
}

impl From<tempfile::PersistError> for StoreError {
    #[track_caller]
    fn from(err: tempfile::PersistError) -> Self {
        Self::new(format!("Failed to replace memo file: {}", err.error))
    }
}

/// File-backed home of the memo table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoStore {
    path: PathBuf,
}

impl MemoStore {
    /// Creates a store for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table. A missing file yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed,
    /// or holds a board with impossible mark counts.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<MemoTable, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No memo file yet, starting empty");
                return Ok(MemoTable::new());
            }
            Err(e) => return Err(e.into()),
        };

        let table: MemoTable = serde_json::from_reader(BufReader::new(file))?;
        if let Some((board, err)) = table
            .iter()
            .find_map(|(board, _)| Position::from_board(*board).err().map(|e| (board, e)))
        {
            return Err(StoreError::new(format!("Unreachable board {}: {}", board, err)));
        }
        info!(entries = table.len(), "Memo table loaded");
        Ok(table)
    }

    /// Reads the table, treating any failure as an empty table.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_or_default(&self) -> MemoTable {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable memo file");
            MemoTable::new()
        })
    }

    /// Writes the table, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the temporary file cannot be written or
    /// moved into place.
    #[instrument(skip(self, table), fields(path = %self.path.display(), entries = table.len()))]
    pub fn save(&self, table: &MemoTable) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        debug!(tmp = %tmp.path().display(), "Writing memo table");
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, table)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        info!("Memo table saved");
        Ok(())
    }
}
