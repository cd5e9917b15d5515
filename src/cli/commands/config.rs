//! Config command - view and set up configuration

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;
use colored::Colorize;

use stoic_journal::config::{Config, DB_PATH_ENV, DEFAULT_CONFIG_TEMPLATE, OFFLINE_ENV};
use stoic_journal::storage::Database;

use crate::cli::Context;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a commented default config file
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// `load_context` is only called by `show`; `path` and `init` work even when
/// the existing config file cannot be parsed.
pub fn run(args: Args, load_context: impl FnOnce() -> Result<Context>) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(&load_context()?),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
        Some(ConfigCommand::Init { force }) => init_config(force),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    println!("{}", "Stoic Journal Configuration".bold());
    println!();

    let config_path = Config::config_path()?;
    let file_state = if config_path.exists() { "" } else { " (not created)" };
    println!(
        "  {}  {}{}",
        "Config file:".dimmed(),
        config_path.display(),
        file_state.dimmed()
    );

    let db_path = ctx.config.resolve_db_path(ctx.db_path.as_deref())?;
    println!("  {}     {}", "Database:".dimmed(), db_path.display());

    if db_path.exists() {
        let count = Database::open(&db_path)?.entry_count()?;
        println!("  {}      {}", "Entries:".dimmed(), count);
    }

    let offline = ctx.config.is_offline(ctx.offline);
    println!(
        "  {}       {}",
        "Quotes:".dimmed(),
        if offline {
            "offline (built-in list)".to_string()
        } else {
            format!("online, {}s timeout", ctx.config.quote_timeout().as_secs())
        }
    );

    println!();
    println!("{}", "Prompt:".bold());
    println!("  {}", ctx.config.prompt());

    println!();
    println!(
        "{}",
        format!("Environment overrides: {DB_PATH_ENV}, {OFFLINE_ENV}").dimmed()
    );

    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to replace it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}
