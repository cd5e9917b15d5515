use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stoic_journal::config::Config;

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "stoic-journal")]
#[command(version)]
#[command(about = "Capture a quick morning reflection alongside a Stoic quote")]
#[command(long_about = "Stoic Journal shows a Stoic quote and a reflection prompt, then\n\
    saves what you write to a local SQLite database, one entry per day.\n\n\
    Running without a command is the same as 'stoic-journal write'.")]
#[command(after_help = "EXAMPLES:\n    \
    stoic-journal                          Write today's entry\n    \
    stoic-journal write --date 2025-11-04  Write an entry for a past day\n    \
    stoic-journal write --force            Replace today's entry\n    \
    stoic-journal list --limit 10          Show the 10 most recent entries\n    \
    stoic-journal show                     Show today's entry\n\n\
    For more information about a command, run 'stoic-journal <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Location of the SQLite database
    #[arg(long, global = true, value_name = "PATH")]
    #[arg(long_help = "Location of the SQLite database. Overrides STOIC_JOURNAL_DB\n\
        and the db_path config key. Defaults to ~/.stoic_journal/journal.sqlite3.")]
    db_path: Option<PathBuf>,

    /// Use the built-in quotes instead of fetching one
    #[arg(long, global = true)]
    offline: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write the journal entry for today (or another date)
    #[command(long_about = "Fetches a Stoic quote, shows the reflection prompt and reads\n\
        your reflection from standard input until a blank line.\n\
        \n\
        Exit status: 0 saved, 1 an entry already exists (use --force),\n\
        2 nothing was written.")]
    Write(commands::write::Args),

    /// Show recent entries, newest first
    List(commands::list::Args),

    /// Show the entry for a single day
    Show(commands::show::Args),

    /// View and set up configuration
    #[command(long_about = "Shows the resolved configuration or writes a default\n\
        config file to ~/.stoic_journal/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "stoic_journal=debug"
    } else {
        "stoic_journal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Loaded only by commands that read it, so a broken config file can
    // still be replaced with `config init --force`.
    let db_path = cli.db_path;
    let offline = cli.offline;
    let load_context = move || -> Result<cli::Context> {
        Ok(cli::Context {
            config: Config::load()?,
            db_path,
            offline,
        })
    };

    match cli.command {
        Some(Commands::Write(args)) => commands::write::run(args, &load_context()?)
            .map(|outcome| ExitCode::from(outcome.exit_code())),
        None => commands::write::run(Default::default(), &load_context()?)
            .map(|outcome| ExitCode::from(outcome.exit_code())),
        Some(Commands::List(args)) => {
            commands::list::run(args, &load_context()?).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Show(args)) => {
            commands::show::run(args, &load_context()?).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Config(args)) => {
            commands::config::run(args, load_context).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Completions(args)) => {
            commands::completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}
