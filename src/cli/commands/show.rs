//! Show command - display the entry for one day.

use std::io::{self, Write};

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use colored::Colorize;

use stoic_journal::journal::today;
use stoic_journal::storage::JournalEntry;

use super::parse_date;
use crate::cli::format::{wrap, WRAP_WIDTH};
use crate::cli::Context;

/// Arguments for the show command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    stoic-journal show                      Show today's entry\n    \
    stoic-journal show --date 2025-11-04    Show the entry for a past day")]
pub struct Args {
    /// Date to show (default: today)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

/// Executes the show command.
pub fn run(args: Args, ctx: &Context) -> Result<()> {
    let app = ctx.open_journal()?;
    let entry_date = args.date.unwrap_or_else(today);
    let entry = app.entry_for(entry_date)?;

    let mut out = io::stdout().lock();
    match entry {
        Some(entry) => render(&entry, &mut out)?,
        None => writeln!(
            out,
            "{}",
            format!("No entry for {entry_date}. Run 'stoic-journal write' to add one.").dimmed()
        )?,
    }
    Ok(())
}

fn render<W: Write>(entry: &JournalEntry, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", entry.entry_date.to_string().bold())?;
    if let Some(created_at) = entry.created_at {
        writeln!(
            out,
            "{}",
            format!("Saved {}", saved_at(created_at)).dimmed()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", wrap(&format!("\"{}\"", entry.quote), WRAP_WIDTH).italic())?;
    if let Some(source) = &entry.quote_source {
        writeln!(out, "- {}", source.cyan())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", wrap(&entry.prompt, WRAP_WIDTH).dimmed())?;
    writeln!(out)?;
    writeln!(out, "{}", wrap(&entry.response, WRAP_WIDTH))
}

/// SQLite stamps rows in UTC; show them in the local zone.
fn saved_at(created_at: NaiveDateTime) -> String {
    Local
        .from_utc_datetime(&created_at)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
