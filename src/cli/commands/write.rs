//! Write command - record a reflection for a day.
//!
//! Fetches a quote, shows it with the prompt, and reads the reflection
//! from standard input until a blank line or end of input.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use stoic_journal::journal::{today, EntryDraft, JournalApp, JournalError};
use stoic_journal::quotes::{Quote, QuoteFetcher};

use super::parse_date;
use crate::cli::format::{wrap, WRAP_WIDTH};
use crate::cli::Context;

/// Arguments for the write command.
#[derive(clap::Args, Default)]
#[command(after_help = "EXAMPLES:\n    \
    stoic-journal write                      Write today's entry\n    \
    stoic-journal write --date 2025-11-04    Write an entry for a past day\n    \
    stoic-journal write --force              Replace today's entry")]
pub struct Args {
    /// Date of the entry (default: today)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Allow overwriting an existing entry for the date
    #[arg(long)]
    pub force: bool,
}

/// How a write attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The entry was saved.
    Saved(NaiveDate),
    /// The date already had an entry and `--force` was not given.
    AlreadyExists(NaiveDate),
    /// Nothing was typed, so nothing was saved.
    Skipped,
}

impl WriteOutcome {
    /// Process exit status: 0 saved, 1 refused duplicate, 2 empty response.
    pub fn exit_code(self) -> u8 {
        match self {
            WriteOutcome::Saved(_) => 0,
            WriteOutcome::AlreadyExists(_) => 1,
            WriteOutcome::Skipped => 2,
        }
    }
}

/// Executes the write command against standard input and output.
pub fn run(args: Args, ctx: &Context) -> Result<WriteOutcome> {
    let app = ctx.open_journal()?;
    let fetcher = ctx.quote_fetcher();
    let entry_date = args.date.unwrap_or_else(today);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    write_entry(&app, &fetcher, entry_date, args.force, &mut input, &mut out)
}

/// Runs one write flow with explicit input and output streams.
pub fn write_entry<R: BufRead, W: Write>(
    app: &JournalApp,
    fetcher: &QuoteFetcher,
    entry_date: NaiveDate,
    force: bool,
    input: &mut R,
    out: &mut W,
) -> Result<WriteOutcome> {
    if !force && app.has_entry_for(entry_date)? {
        writeln!(
            out,
            "{}",
            format!("An entry already exists for {entry_date}. Use --force to overwrite.").yellow()
        )?;
        return Ok(WriteOutcome::AlreadyExists(entry_date));
    }

    let quote = fetcher.fetch();
    render_quote(&quote, out)?;
    writeln!(out, "{}", wrap(app.prompt(), WRAP_WIDTH))?;
    writeln!(
        out,
        "\n{}\n",
        "Take a couple of minutes to jot down your thoughts. Press Enter twice when you are finished."
            .dimmed()
    )?;
    out.flush()?;

    let response = capture_response(input)?;
    if response.is_empty() {
        writeln!(out, "{}", "No response captured. Entry skipped.".yellow())?;
        return Ok(WriteOutcome::Skipped);
    }

    let draft = EntryDraft::new(response, quote.text)
        .quote_source(quote.author)
        .on(entry_date)
        .allow_overwrite(force);

    match app.record_entry(draft) {
        Ok(id) => {
            tracing::debug!("Saved entry {} for {}", id, entry_date);
            writeln!(out, "\n{}\n", format!("Entry saved for {entry_date}.").green())?;
            Ok(WriteOutcome::Saved(entry_date))
        }
        Err(JournalError::DuplicateEntry(date)) => {
            writeln!(
                out,
                "{}",
                format!("An entry already exists for {date}. Use --force to overwrite.").yellow()
            )?;
            Ok(WriteOutcome::AlreadyExists(date))
        }
        Err(e) => Err(e.into()),
    }
}

fn render_quote<W: Write>(quote: &Quote, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}\n", "Today's Stoic quote:".bold())?;
    writeln!(out, "{}", wrap(&format!("\"{}\"", quote.text), WRAP_WIDTH).italic())?;
    if let Some(author) = &quote.author {
        writeln!(out, "\n- {}", author.cyan())?;
    }
    writeln!(out)
}

/// Reads lines until the first blank line or end of input.
///
/// Trailing whitespace is stripped from each line and the joined result
/// is trimmed, so an empty return means nothing was written.
pub fn capture_response<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.trim_end().to_string());
    }
    Ok(lines.join("\n").trim().to_string())
}
