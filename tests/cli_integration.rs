//! Integration tests for the journal library
//!
//! These tests exercise the journaling flows the CLI is built on, using
//! temporary databases to ensure test isolation.

use chrono::NaiveDate;
use stoic_journal::journal::{EntryDraft, JournalApp, JournalConfig, JournalError};
use stoic_journal::quotes::{QuoteFetcher, FALLBACK_QUOTES};
use stoic_journal::storage::Database;
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Opens a journal in a temporary directory.
/// Returns the app and the temp directory (which must be kept alive).
fn create_test_app() -> (JournalApp, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let app = JournalApp::new(JournalConfig::new(dir.path().join("journal.sqlite3")))
        .expect("Failed to open journal");
    (app, dir)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Records the two-day scenario: 2025-11-04 then 2025-11-05.
fn record_two_days(app: &JournalApp) {
    app.record_entry(
        EntryDraft::new("First note", "Stay calm")
            .quote_source(Some("Marcus Aurelius"))
            .on(date("2025-11-04")),
    )
    .expect("Failed to record first entry");
    app.record_entry(
        EntryDraft::new("Second note", "Practice virtue")
            .quote_source(Some("Epictetus"))
            .on(date("2025-11-05")),
    )
    .expect("Failed to record second entry");
}

// =============================================================================
// Journal Scenario Tests
// =============================================================================

mod journal_tests {
    use super::*;

    #[test]
    fn test_record_entry_and_summary() {
        let (app, _dir) = create_test_app();
        record_two_days(&app);

        let entries = app.summary(None).expect("Failed to summarize");
        let dates: Vec<String> = entries.iter().map(|e| e.entry_date.to_string()).collect();

        assert_eq!(dates, vec!["2025-11-05", "2025-11-04"]);
        assert_eq!(entries[0].quote_source.as_deref(), Some("Epictetus"));
        assert_eq!(entries[0].response, "Second note");
        assert_eq!(entries[1].quote, "Stay calm");
    }

    #[test]
    fn test_record_entry_prevents_duplicates() {
        let (app, dir) = create_test_app();
        record_two_days(&app);

        let result = app.record_entry(EntryDraft::new("Again", "Quote").on(date("2025-11-05")));
        match result {
            Err(JournalError::DuplicateEntry(d)) => assert_eq!(d, date("2025-11-05")),
            other => panic!("Expected DuplicateEntry, got: {other:?}"),
        }

        let db = Database::open(dir.path().join("journal.sqlite3")).expect("Failed to open db");
        let row = db
            .get_entry_by_date("2025-11-05")
            .expect("Failed to get entry")
            .expect("Entry should exist");
        assert_eq!(row.response, "Second note", "Original row must be unchanged");
    }

    #[test]
    fn test_allow_overwrite_updates_entry() {
        let (app, dir) = create_test_app();
        record_two_days(&app);

        let original_id = app
            .entry_for(date("2025-11-05"))
            .expect("Lookup failed")
            .expect("Entry should exist")
            .id;

        let id = app
            .record_entry(
                EntryDraft::new("Updated", "Waste no more time")
                    .quote_source(Some("Marcus Aurelius"))
                    .on(date("2025-11-05"))
                    .allow_overwrite(true),
            )
            .expect("Overwrite should succeed");
        assert_eq!(id, original_id, "Overwrite keeps the same row");

        let db = Database::open(dir.path().join("journal.sqlite3")).expect("Failed to open db");
        let row = db
            .get_entry_by_date("2025-11-05")
            .expect("Failed to get entry")
            .expect("Entry should exist");
        assert_eq!(row.response, "Updated");
        assert_eq!(row.quote, "Waste no more time");
        assert_eq!(row.quote_source.as_deref(), Some("Marcus Aurelius"));
        assert_eq!(db.entry_count().expect("Failed to count"), 2);
    }

    #[test]
    fn test_has_entry_for_before_and_after_write() {
        let (app, _dir) = create_test_app();
        let day = date("2025-11-06");

        assert!(!app.has_entry_for(day).expect("Check failed"));
        app.record_entry(EntryDraft::new("Note", "Quote").on(day))
            .expect("Failed to record entry");
        assert!(app.has_entry_for(day).expect("Check failed"));
    }

    #[test]
    fn test_summary_limit_returns_most_recent() {
        let (app, _dir) = create_test_app();

        // Insert out of order to make sure ordering comes from the date
        for day in ["2025-10-03", "2025-10-01", "2025-10-05", "2025-10-02", "2025-10-04"] {
            app.record_entry(EntryDraft::new(format!("Note {day}"), "Quote").on(date(day)))
                .expect("Failed to record entry");
        }

        let entries = app.summary(Some(3)).expect("Failed to summarize");
        let dates: Vec<String> = entries.iter().map(|e| e.entry_date.to_string()).collect();
        assert_eq!(dates, vec!["2025-10-05", "2025-10-04", "2025-10-03"]);

        let all = app.summary(Some(50)).expect("Failed to summarize");
        assert_eq!(all.len(), 5);
        assert!(
            all.windows(2).all(|w| w[0].entry_date > w[1].entry_date),
            "Dates should be strictly descending"
        );
    }

    #[test]
    fn test_reopening_journal_keeps_entries() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("nested").join("journal.sqlite3");

        {
            let app = JournalApp::new(JournalConfig::new(&path)).expect("Failed to open journal");
            record_two_days(&app);
        }

        let app = JournalApp::new(JournalConfig::new(&path)).expect("Failed to reopen journal");
        assert_eq!(app.summary(None).expect("Failed to summarize").len(), 2);
    }
}

// =============================================================================
// Quote Tests
// =============================================================================

mod quote_tests {
    use super::*;

    #[test]
    fn test_quote_always_available_without_network() {
        let fetcher = QuoteFetcher::with_endpoints(
            ["http://127.0.0.1:1/unreachable"],
            std::time::Duration::from_millis(500),
        );

        for _ in 0..3 {
            let quote = fetcher.fetch();
            assert!(!quote.text.is_empty());
            assert!(FALLBACK_QUOTES.iter().any(|(text, _)| *text == quote.text));
        }
    }

    #[test]
    fn test_fallback_quote_can_be_recorded() {
        let (app, _dir) = create_test_app();
        let quote = QuoteFetcher::offline().fetch();

        app.record_entry(
            EntryDraft::new("Reflection", quote.text.clone())
                .quote_source(quote.author.clone())
                .on(date("2025-11-07")),
        )
        .expect("Failed to record entry");

        let entry = app
            .entry_for(date("2025-11-07"))
            .expect("Lookup failed")
            .expect("Entry should exist");
        assert_eq!(entry.quote, quote.text);
        assert_eq!(entry.quote_source, quote.author);
    }
}
