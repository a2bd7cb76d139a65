//! habitkit command-line interface.
//!
//! Thin presentation layer over `habitkit_core`: every streak number shown
//! here comes from the core analysis functions, never from local math.

mod commands;
mod seed;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use habitkit_core::{HabitService, Periodicity, SqliteHabitRepository};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "habitkit",
    version,
    about = "habitkit: periodic habit tracker with streak analytics",
    long_about = None
)]
struct Cli {
    /// Path to the habit store (defaults to the platform data directory).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PeriodicityArg {
    Daily,
    Weekly,
}

impl From<PeriodicityArg> for Periodicity {
    fn from(value: PeriodicityArg) -> Self {
        match value {
            PeriodicityArg::Daily => Self::Daily,
            PeriodicityArg::Weekly => Self::Weekly,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Cadence of the habit
        #[arg(short, long, value_enum)]
        periodicity: PeriodicityArg,
    },
    /// Mark a habit as complete for a day or week
    Done {
        /// Habit name (case-insensitive)
        name: String,
        /// Completion date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        on: Option<String>,
    },
    /// List habits with their current streaks
    List {
        /// Only habits with this cadence
        #[arg(short, long, value_enum)]
        periodicity: Option<PeriodicityArg>,
    },
    /// Show one habit in full detail
    Show {
        /// Habit name (case-insensitive)
        name: String,
    },
    /// Show current and longest streaks for all habits
    Streaks,
    /// Show the habit with the longest current streak
    Longest,
    /// Rename or redescribe a habit
    Edit {
        /// Habit name (case-insensitive)
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a habit and its completion history
    Delete {
        /// Habit name (case-insensitive)
        name: String,
    },
    /// Insert predefined example habits with four weeks of history
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;

        let level = if cli.verbose {
            "debug"
        } else {
            habitkit_core::default_log_level()
        };
        // A broken log setup should not block habit tracking.
        if let Err(err) = habitkit_core::init_logging(level, parent.join("logs")) {
            eprintln!("warning: {err}");
        }
    }

    let conn = habitkit_core::db::open_db(&db_path)
        .with_context(|| format!("opening habit store {}", db_path.display()))?;
    let repo = SqliteHabitRepository::try_new(&conn)?;
    let service = HabitService::new(repo);
    let mut tracker = service.load_tracker()?;

    match cli.command {
        Commands::Add {
            name,
            description,
            periodicity,
        } => commands::add(&service, &mut tracker, &name, &description, periodicity.into()),
        Commands::Done { name, on } => commands::done(&service, &mut tracker, &name, on.as_deref()),
        Commands::List { periodicity } => {
            commands::list(&tracker, periodicity.map(Into::into));
            Ok(())
        }
        Commands::Show { name } => {
            commands::show(&tracker, &name);
            Ok(())
        }
        Commands::Streaks => {
            commands::streaks(&tracker);
            Ok(())
        }
        Commands::Longest => {
            commands::longest(&tracker);
            Ok(())
        }
        Commands::Edit {
            name,
            rename,
            description,
        } => commands::edit(
            &service,
            &mut tracker,
            &name,
            rename.as_deref(),
            description.as_deref(),
        ),
        Commands::Delete { name } => commands::delete(&service, &mut tracker, &name),
        Commands::Seed => seed::run(&service, &mut tracker),
    }
}

fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no platform data directory available"))?;
    Ok(base.join("habitkit").join("habits.db"))
}
