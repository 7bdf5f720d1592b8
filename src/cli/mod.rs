//! Command-line surface, built with clap's derive macros.
//!
//! Running with no subcommand lists the ranked todos; everything else is an
//! explicit subcommand.

pub mod categories;
pub mod projects;
pub mod todos;

use categories::CategoryCommand;
use clap::{Parser, Subcommand};
use projects::ProjectCommand;
use todos::{AddArgs, ListArgs, UpdateArgs};

/// Personal todo manager with weighted multi-criteria ranking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Add a new todo
    #[command(visible_alias = "a")]
    Add(AddArgs),

    /// List open todos ranked by score (default if no subcommand given)
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Mark a todo as complete
    #[command(visible_alias = "done")]
    Complete {
        /// Todo id
        id: i64,
    },

    /// Update fields on a todo
    #[command(visible_alias = "m")]
    Update(UpdateArgs),

    /// Delete a todo
    Delete {
        /// Todo id
        id: i64,
    },

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
}
