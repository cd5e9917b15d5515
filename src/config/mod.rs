//! Configuration management
//!
//! Settings live in `~/.stoic_journal/config.yaml`. Every key is optional;
//! a missing file means built-in defaults. Values resolve with the
//! precedence: command-line flag, then environment variable, then config
//! file, then default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::journal::{JournalConfig, DEFAULT_PROMPT};
use crate::quotes::DEFAULT_TIMEOUT;
use crate::storage::db::{default_db_path, DATA_DIR_NAME};

/// Overrides the database location.
pub const DB_PATH_ENV: &str = "STOIC_JOURNAL_DB";

/// Disables network quote fetching when set to a truthy value.
pub const OFFLINE_ENV: &str = "STOIC_JOURNAL_OFFLINE";

/// Written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Stoic Journal configuration
#
# Every key is optional. Remove the leading '#' to change a value.

# Location of the SQLite database.
# db_path: ~/.stoic_journal/journal.sqlite3

# Prompt shown before writing a reflection.
# prompt: "What stands out to you today?"

# Seconds to wait for each quote endpoint.
# quote_timeout_secs: 5

# Skip the network and always use the built-in quotes.
# offline: false
"#;

/// Contents of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database location (`~` is expanded)
    pub db_path: Option<PathBuf>,

    /// Replaces the default reflection prompt
    pub prompt: Option<String>,

    /// Per-endpoint timeout for quote requests
    pub quote_timeout_secs: Option<u64>,

    /// Never fetch quotes from the network
    pub offline: Option<bool>,
}

impl Config {
    /// Load the config file, or defaults when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load a config file from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config YAML. A document with only comments yields the defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        let has_content = contents.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        if !has_content {
            return Ok(Self::default());
        }
        let config: Config = serde_saphyr::from_str(contents)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(DATA_DIR_NAME);

        Ok(config_dir.join("config.yaml"))
    }

    /// Resolve the database path: flag, then `STOIC_JOURNAL_DB`, then
    /// the config file, then `~/.stoic_journal/journal.sqlite3`.
    pub fn resolve_db_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        let from_env = env::var_os(DB_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_db_path_with(flag, from_env)
    }

    fn resolve_db_path_with(
        &self,
        flag: Option<&Path>,
        from_env: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let chosen = flag
            .map(Path::to_path_buf)
            .or(from_env)
            .or_else(|| self.db_path.clone());

        match chosen {
            Some(path) => Ok(expand_home(&path)),
            None => Ok(default_db_path()?),
        }
    }

    /// The prompt shown before writing, falling back to [`DEFAULT_PROMPT`].
    pub fn prompt(&self) -> String {
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROMPT)
            .to_string()
    }

    /// Per-endpoint quote timeout.
    pub fn quote_timeout(&self) -> Duration {
        self.quote_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Whether quotes should come only from the local list.
    pub fn is_offline(&self, flag: bool) -> bool {
        let from_env = env::var(OFFLINE_ENV).ok();
        self.is_offline_with(flag, from_env.as_deref())
    }

    fn is_offline_with(&self, flag: bool, from_env: Option<&str>) -> bool {
        if flag {
            return true;
        }
        if let Some(value) = from_env.and_then(parse_bool) {
            return value;
        }
        self.offline.unwrap_or(false)
    }

    /// Build the journal configuration handed to the coordinator.
    pub fn journal_config(&self, db_flag: Option<&Path>) -> Result<JournalConfig> {
        Ok(JournalConfig {
            db_path: self.resolve_db_path(db_flag)?,
            prompt: self.prompt(),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
