//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{Filter, Theme};
use crate::storage::{Config, FileStore, Workspace};

use super::output::{Output, OutputFormat};
use super::{query, task};

#[derive(Parser)]
#[command(name = "tick")]
#[command(author, version, about = "A local-first to-do list for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the store file (overrides config)
    #[arg(long, global = true, env = "TICK_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text
        text: String,
    },

    /// List tasks
    List {
        /// Filter to apply (defaults to the configured filter)
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Toggle a task between open and completed
    Done {
        /// Task ID
        id: String,
    },

    /// Toggle a task's star
    Star {
        /// Task ID
        id: String,
    },

    /// Replace a task's text (empty text deletes the task)
    Edit {
        /// Task ID
        id: String,

        /// New text
        text: String,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },

    /// Manage a task's tags
    #[command(subcommand)]
    Tag(TagCommands),

    /// Set or clear a task's due date
    Due {
        /// Task ID
        id: String,

        /// Due date (YYYY-MM-DD)
        date: Option<NaiveDate>,

        /// Clear the due date instead
        #[arg(long)]
        clear: bool,
    },

    /// Move a task to a new position
    Move {
        /// Task ID
        id: String,

        /// Place the task immediately before this one (default: end of list)
        #[arg(long)]
        before: Option<String>,
    },

    /// Remove every completed task
    ClearDone,

    /// Undo the most recent change
    Undo,

    /// List every tag ever used
    Tags,

    /// Show or set the color theme
    Theme {
        /// Theme to switch to (omit to show the current one)
        #[arg(value_enum)]
        theme: Option<Theme>,
    },

    /// Show a summary of the board
    Status,
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// Add a tag to a task
    Add {
        /// Task ID
        id: String,

        /// Tag label (without the leading #)
        tag: String,
    },

    /// Remove a tag from a task
    Rm {
        /// Task ID
        id: String,

        /// Tag label
        tag: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load()?;
    let store_path = config.resolve_store_path(cli.store)?;
    output.verbose(&format!("Using store at {}", store_path.display()));

    let store = FileStore::new(store_path);
    let mut ws = Workspace::open(store).context("Failed to open the task store")?;

    match cli.command {
        Commands::Add { text } => task::add(&mut ws, &output, &text)?,

        Commands::List { filter } => {
            if let Some(filter) = filter.or(config.default_filter) {
                ws.set_filter(filter);
            }
            query::list(&ws, &output, ws.board().filter())?;
        }

        Commands::Done { id } => task::done(&mut ws, &output, &id)?,
        Commands::Star { id } => task::star(&mut ws, &output, &id)?,
        Commands::Edit { id, text } => task::edit(&mut ws, &output, &id, &text)?,
        Commands::Rm { id } => task::remove(&mut ws, &output, &id)?,

        Commands::Tag(cmd) => match cmd {
            TagCommands::Add { id, tag } => task::tag_add(&mut ws, &output, &id, &tag)?,
            TagCommands::Rm { id, tag } => task::tag_remove(&mut ws, &output, &id, &tag)?,
        },

        Commands::Due { id, date, clear } => task::due(&mut ws, &output, &id, date, clear)?,
        Commands::Move { id, before } => {
            task::move_task(&mut ws, &output, &id, before.as_deref())?;
        }
        Commands::ClearDone => task::clear_done(&mut ws, &output)?,
        Commands::Undo => task::undo(&mut ws, &output)?,

        Commands::Tags => query::tags(&ws, &output)?,
        Commands::Theme { theme } => query::theme(&mut ws, &output, theme)?,
        Commands::Status => query::status(&ws, &output)?,
    }

    Ok(())
}
