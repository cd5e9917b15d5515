//! List command - show recent entries.
//!
//! Displays the most recent entries, newest date first, as text or JSON.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use stoic_journal::storage::JournalEntry;

use crate::cli::format::{wrap, WRAP_WIDTH};
use crate::cli::{Context, OutputFormat};

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stoic-journal list                  Show the 5 most recent entries\n    \
    stoic-journal list --limit 30       Show up to 30 entries\n    \
    stoic-journal list --format json    Output as JSON")]
pub struct Args {
    /// Number of entries to display
    #[arg(short, long, default_value = "5", value_name = "N")]
    pub limit: usize,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the list command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    let app = ctx.open_journal()?;
    let entries = app.summary(Some(args.limit))?;

    let mut out = io::stdout().lock();
    render(&entries, args.format, &mut out)
}

/// Writes entries in the requested format.
pub fn render<W: Write>(entries: &[JournalEntry], format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(entries)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                writeln!(out, "{}", "No journal entries found yet.".dimmed())?;
                return Ok(());
            }

            for entry in entries {
                writeln!(out, "{}", format!("{}:", entry.entry_date).bold())?;
                writeln!(out, "{}", wrap(&format!("Quote: {}", entry.quote), WRAP_WIDTH))?;
                if let Some(source) = &entry.quote_source {
                    writeln!(out, "Source: {}", source.cyan())?;
                }
                writeln!(
                    out,
                    "{}",
                    wrap(&format!("Reflection: {}", entry.response), WRAP_WIDTH)
                )?;
                writeln!(out, "{}", "-".repeat(40).dimmed())?;
            }
        }
    }

    Ok(())
}
