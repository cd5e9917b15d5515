//! CLI commands for the journal.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing and setup.
pub mod config;

/// List recent entries.
pub mod list;

/// Display a single day's entry.
pub mod show;

/// Write a reflection for a day.
pub mod write;

use chrono::NaiveDate;
use stoic_journal::journal::DATE_FORMAT;

/// Parses a `YYYY-MM-DD` command-line date.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("'{value}' is not a date in YYYY-MM-DD form"))
}
