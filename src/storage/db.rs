//! SQLite storage layer for the journal

use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::models::{EntryRow, NewEntryRow};

/// Directory under the home directory holding the database and config.
pub const DATA_DIR_NAME: &str = ".stoic_journal";

/// File name of the database inside [`DATA_DIR_NAME`].
pub const DB_FILE_NAME: &str = "journal.sqlite3";

const ENTRY_COLUMNS: &str =
    "id, entry_date, prompt, response, quote, quote_source, created_at";

/// Errors raised by the entry store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The uniqueness constraint on `entry_date` rejected an insert.
    #[error("An entry already exists for {entry_date}")]
    Conflict {
        /// The occupied date.
        entry_date: String,
    },

    /// Any other SQLite failure.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to create the directory holding the database.
    #[error("Could not prepare database location: {0}")]
    Io(#[from] std::io::Error),

    /// The home directory could not be determined.
    #[error("Could not find home directory")]
    NoHomeDir,
}

/// Get the default database path (`~/.stoic_journal/journal.sqlite3`)
pub fn default_db_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::home_dir()
        .ok_or(StorageError::NoHomeDir)?
        .join(DATA_DIR_NAME);

    Ok(data_dir.join(DB_FILE_NAME))
}

/// Handle to the journal database file.
///
/// Every operation opens its own connection, runs a single statement and
/// drops the connection again; nothing is held open between calls.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open or create the database, creating parent directories as needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self { path };
        db.initialize()?;
        Ok(db)
    }

    /// Open the database at the default location
    pub fn open_default() -> Result<Self, StorageError> {
        let path = default_db_path()?;
        Self::open(path)
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Ensure the schema exists. Safe to call on every startup.
    pub fn initialize(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_date TEXT NOT NULL UNIQUE,
                prompt TEXT NOT NULL,
                response TEXT NOT NULL,
                quote TEXT NOT NULL,
                quote_source TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(())
    }

    // ==================== Entries ====================

    /// Insert an entry, or replace the entry for the same date when
    /// `overwrite` is set.
    ///
    /// Without `overwrite`, an occupied date is rejected by the table's
    /// uniqueness constraint and reported as [`StorageError::Conflict`].
    /// An overwrite keeps the row id and resets `created_at`.
    pub fn add_entry(&self, entry: &NewEntryRow<'_>, overwrite: bool) -> Result<i64, StorageError> {
        let conn = self.connect()?;

        if overwrite {
            let id: i64 = conn.query_row(
                r#"
                INSERT INTO entries (entry_date, prompt, response, quote, quote_source)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(entry_date) DO UPDATE SET
                    prompt = excluded.prompt,
                    response = excluded.response,
                    quote = excluded.quote,
                    quote_source = excluded.quote_source,
                    created_at = CURRENT_TIMESTAMP
                RETURNING id
                "#,
                params![
                    entry.entry_date,
                    entry.prompt,
                    entry.response,
                    entry.quote,
                    entry.quote_source,
                ],
                |row| row.get(0),
            )?;
            tracing::debug!("Wrote entry {} for {} (overwrite)", id, entry.entry_date);
            return Ok(id);
        }

        let inserted = conn.execute(
            r#"
            INSERT INTO entries (entry_date, prompt, response, quote, quote_source)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.entry_date,
                entry.prompt,
                entry.response,
                entry.quote,
                entry.quote_source,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                tracing::debug!("Wrote entry {} for {}", id, entry.entry_date);
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => Err(StorageError::Conflict {
                entry_date: entry.entry_date.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the entry stored for an exact date string
    pub fn get_entry_by_date(&self, entry_date: &str) -> Result<Option<EntryRow>, StorageError> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE entry_date = ?1"),
                params![entry_date],
                Self::row_to_entry,
            )
            .optional()?;
        Ok(row)
    }

    /// List entries, most recent date first, returning at most `limit` rows
    pub fn list_entries(&self, limit: Option<usize>) -> Result<Vec<EntryRow>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY entry_date DESC LIMIT ?1"
        ))?;

        // A negative LIMIT is unbounded in SQLite.
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let rows = stmt.query_map(params![limit], Self::row_to_entry)?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<EntryRow> {
        Ok(EntryRow {
            id: row.get(0)?,
            entry_date: row.get(1)?,
            prompt: row.get(2)?,
            response: row.get(3)?,
            quote: row.get(4)?,
            quote_source: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    // ==================== Stats ====================

    /// Get total entry count
    pub fn entry_count(&self) -> Result<i64, StorageError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
