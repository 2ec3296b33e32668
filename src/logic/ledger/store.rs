//! Ledger Storage Backends
//!
//! Append-only record stores. A store knows nothing about hashes: it keeps
//! serialized entries in write order and hands them back unchanged.
//!
//! - `JsonlStore`: one JSON object per line (.jsonl / .log)
//! - `SqliteStore`: rows keyed by an autoincrement sequence
//! - `MemoryStore`: ephemeral, for tests and dry runs

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use super::types::LedgerError;

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Append-only record store: no update, no delete.
pub trait LedgerStore: Send {
    /// Persist one record durably before returning
    fn append_record(&mut self, record: &str) -> Result<(), LedgerError>;

    /// All records in write order
    fn read_records(&self) -> Result<Vec<String>, LedgerError>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

// ============================================================================
// JSONL FILE STORE
// ============================================================================

pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Open (or prepare) a JSONL store. The file is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonlStore {
    fn append_record(&mut self, record: &str) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", record)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<String>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        // Lossy decode: a mangled byte must surface as a bad record, not an I/O error
        let mut bytes = Vec::new();
        File::open(&self.path)?.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes);

        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// SQLITE STORE
// ============================================================================

const CREATE_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS ledger_records (
    seq     INTEGER PRIMARY KEY AUTOINCREMENT,
    record  TEXT NOT NULL
);";

pub struct SqliteStore {
    conn: Connection,
    location: String,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_SCHEMA_SQL)?;
        log::info!("Opened SQLite ledger store at {}", path.display());

        Ok(Self {
            conn,
            location: path.display().to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_SCHEMA_SQL)?;
        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }
}

impl LedgerStore for SqliteStore {
    fn append_record(&mut self, record: &str) -> Result<(), LedgerError> {
        self.conn.execute(
            "INSERT INTO ledger_records (record) VALUES (?1)",
            params![record],
        )?;
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<String>, LedgerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT record FROM ledger_records ORDER BY seq ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.location)
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn append_record(&mut self, record: &str) -> Result<(), LedgerError> {
        self.records.push(record.to_string());
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
