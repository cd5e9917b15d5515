//! Core data models for the journal
//!
//! `EntryRow` mirrors a row of the `entries` table exactly as stored.
//! `JournalEntry` is the typed form handed to the CLI; only the journal
//! coordinator converts one into the other.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A raw row from the `entries` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Auto-incrementing row identifier
    pub id: i64,

    /// ISO date string (`YYYY-MM-DD`), unique per row
    pub entry_date: String,

    pub prompt: String,

    pub response: String,

    pub quote: String,

    pub quote_source: Option<String>,

    /// SQLite `CURRENT_TIMESTAMP` text, if recorded
    pub created_at: Option<String>,
}

/// Column values for an insert or overwrite.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewEntryRow<'a> {
    pub entry_date: &'a str,
    pub prompt: &'a str,
    pub response: &'a str,
    pub quote: &'a str,
    pub quote_source: Option<&'a str>,
}

/// A journal entry: one reflection tied to exactly one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Store-assigned identifier
    pub id: i64,

    /// The calendar day this reflection belongs to
    pub entry_date: NaiveDate,

    /// The prompt shown when the reflection was written
    pub prompt: String,

    /// The user's reflection
    pub response: String,

    /// Quote text shown alongside the prompt
    pub quote: String,

    /// Attribution of the quote, when known
    pub quote_source: Option<String>,

    /// When the row was created (or last overwritten)
    pub created_at: Option<NaiveDateTime>,
}
