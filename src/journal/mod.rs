//! Journaling workflow.
//!
//! [`JournalApp`] is the one place with journaling policy: it decides
//! whether a date already has an entry, fills in defaults for a new
//! entry, and turns stored rows into typed [`JournalEntry`] values.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::storage::{Database, EntryRow, JournalEntry, NewEntryRow, StorageError};

/// Prompt used when neither the caller nor the configuration supplies one.
pub const DEFAULT_PROMPT: &str = "Take a deep breath, consider today's Stoic teaching, and jot down a quick reflection. \
     What stands out to you and how will you carry it forward today?";

/// Date format of the `entry_date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Where the journal lives and which prompt it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Prompt recorded with entries that do not bring their own
    pub prompt: String,
}

impl JournalConfig {
    /// Configuration with the [`DEFAULT_PROMPT`].
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

/// Errors from journaling operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The date already holds an entry and overwrite was not requested.
    #[error("An entry already exists for {0}.")]
    DuplicateEntry(NaiveDate),

    /// A stored row holds a value that cannot be read back.
    #[error("Entry {id} has an unreadable {field}: '{value}'")]
    CorruptRow {
        id: i64,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A reflection waiting to be recorded.
///
/// Only `response` and `quote` are required; the date defaults to today
/// and the prompt to the journal's configured prompt.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub response: String,
    pub quote: String,
    pub quote_source: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub prompt: Option<String>,
    pub allow_overwrite: bool,
}

impl EntryDraft {
    pub fn new(response: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            quote: quote.into(),
            ..Self::default()
        }
    }

    pub fn quote_source<S: Into<String>>(mut self, source: Option<S>) -> Self {
        self.quote_source = source.map(Into::into);
        self
    }

    pub fn on(mut self, entry_date: NaiveDate) -> Self {
        self.entry_date = Some(entry_date);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Coordinates prompts and quotes with the entry store.
#[derive(Debug, Clone)]
pub struct JournalApp {
    db: Database,
    prompt: String,
}

impl JournalApp {
    /// Opens (creating if needed) the journal described by `config`.
    pub fn new(config: JournalConfig) -> Result<Self, JournalError> {
        let db = Database::open(&config.db_path)?;
        Ok(Self {
            db,
            prompt: config.prompt,
        })
    }

    /// The prompt recorded with entries that do not supply their own.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether an entry exists for `entry_date`.
    pub fn has_entry_for(&self, entry_date: NaiveDate) -> Result<bool, JournalError> {
        let iso_date = entry_date.format(DATE_FORMAT).to_string();
        Ok(self.db.get_entry_by_date(&iso_date)?.is_some())
    }

    /// Records a reflection and returns the row id.
    ///
    /// Response, quote and source are trimmed; a blank source is stored as
    /// absent. An empty response is not rejected here, callers decide
    /// whether to skip it.
    ///
    /// # Errors
    ///
    /// [`JournalError::DuplicateEntry`] if the date is occupied and the
    /// draft does not allow overwriting. The early check here is only a fast
    /// path; a conflict reported by the store maps to the same error.
    pub fn record_entry(&self, draft: EntryDraft) -> Result<i64, JournalError> {
        let entry_date = draft.entry_date.unwrap_or_else(today);
        let iso_date = entry_date.format(DATE_FORMAT).to_string();
        let prompt = draft
            .prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(self.prompt.as_str());

        if !draft.allow_overwrite && self.has_entry_for(entry_date)? {
            return Err(JournalError::DuplicateEntry(entry_date));
        }

        let row = NewEntryRow {
            entry_date: &iso_date,
            prompt,
            response: draft.response.trim(),
            quote: draft.quote.trim(),
            quote_source: draft
                .quote_source
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        };

        self.insert(entry_date, &row, draft.allow_overwrite)
    }

    /// Writes `row`, reporting a uniqueness conflict from the store as
    /// [`JournalError::DuplicateEntry`].
    fn insert(
        &self,
        entry_date: NaiveDate,
        row: &NewEntryRow<'_>,
        overwrite: bool,
    ) -> Result<i64, JournalError> {
        self.db.add_entry(row, overwrite).map_err(|e| match e {
            StorageError::Conflict { .. } => JournalError::DuplicateEntry(entry_date),
            other => other.into(),
        })
    }

    /// The entry for `entry_date`, if one has been recorded.
    pub fn entry_for(&self, entry_date: NaiveDate) -> Result<Option<JournalEntry>, JournalError> {
        let iso_date = entry_date.format(DATE_FORMAT).to_string();
        self.db
            .get_entry_by_date(&iso_date)?
            .map(Self::row_to_entry)
            .transpose()
    }

    /// Recent entries, most recent date first, at most `limit` of them.
    pub fn summary(&self, limit: Option<usize>) -> Result<Vec<JournalEntry>, JournalError> {
        self.db
            .list_entries(limit)?
            .into_iter()
            .map(Self::row_to_entry)
            .collect()
    }

    fn row_to_entry(row: EntryRow) -> Result<JournalEntry, JournalError> {
        let entry_date = NaiveDate::parse_from_str(&row.entry_date, DATE_FORMAT).map_err(|_| {
            JournalError::CorruptRow {
                id: row.id,
                field: "entry_date",
                value: row.entry_date.clone(),
            }
        })?;

        let created_at = match row.created_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| JournalError::CorruptRow {
                id: row.id,
                field: "created_at",
                value: raw.to_string(),
            })?),
        };

        Ok(JournalEntry {
            id: row.id,
            entry_date,
            prompt: row.prompt,
            response: row.response,
            quote: row.quote,
            quote_source: row.quote_source,
            created_at,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
