//! Command-line interface for the journal.
//!
//! Provides the CLI commands for writing today's reflection, listing
//! recent entries and managing configuration.

/// Individual CLI command implementations.
pub mod commands;

/// Output formatting helpers shared by commands.
pub mod format;

pub use format::OutputFormat;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use stoic_journal::config::Config;
use stoic_journal::journal::JournalApp;
use stoic_journal::quotes::QuoteFetcher;

/// Settings shared by every command: the loaded config file plus global
/// flags.
pub struct Context {
    pub config: Config,
    pub db_path: Option<PathBuf>,
    pub offline: bool,
}

impl Context {
    /// Opens the journal at the resolved database path.
    pub fn open_journal(&self) -> Result<JournalApp> {
        let journal_config = self.config.journal_config(self.db_path.as_deref())?;
        tracing::debug!("Opening journal at {:?}", journal_config.db_path);

        let path = journal_config.db_path.clone();
        JournalApp::new(journal_config)
            .with_context(|| format!("Failed to open journal at {}", path.display()))
    }

    /// Builds the quote fetcher, honouring offline mode.
    pub fn quote_fetcher(&self) -> QuoteFetcher {
        if self.config.is_offline(self.offline) {
            QuoteFetcher::offline()
        } else {
            QuoteFetcher::new(self.config.quote_timeout())
        }
    }
}
