//! Todo subcommands: add, list, complete, update, delete.

use crate::db::{Database, now_ms};
use crate::format::render_todo_table;
use crate::rank::rank_todos;
use crate::score::ScoreConfig;
use crate::types::{TodoInput, TodoUpdate};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::{Args, ValueEnum};

/// Sort order for the list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Rank by score (highest first)
    #[default]
    Score,
    /// Keep insertion order
    Id,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// What needs to be done
    pub text: String,

    /// Category name (must already exist)
    #[arg(short, long)]
    pub category: String,

    /// Importance, 0-10
    #[arg(short, long, default_value_t = 5.0)]
    pub priority: f64,

    /// Payoff, 0-10
    #[arg(long, default_value_t = 5.0)]
    pub value: f64,

    /// Estimated effort in hours
    #[arg(short, long, default_value_t = 1.0)]
    pub time_required: f64,

    /// Deadline as YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long)]
    pub deadline: Option<String>,

    /// Project id to associate with
    #[arg(long)]
    pub project: Option<i64>,

    /// Ids of todos this one depends on
    #[arg(long, value_delimiter = ',')]
    pub depends_on: Vec<i64>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort method
    #[arg(short, long, value_enum, default_value_t = SortMode::Score)]
    pub sort: SortMode,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Todo id
    pub id: i64,

    /// New text
    #[arg(long)]
    pub text: Option<String>,

    /// New category (must already exist)
    #[arg(short, long)]
    pub category: Option<String>,

    /// New importance, 0-10
    #[arg(short, long)]
    pub priority: Option<f64>,

    /// New payoff, 0-10
    #[arg(long)]
    pub value: Option<f64>,

    /// New effort estimate in hours
    #[arg(short, long)]
    pub time_required: Option<f64>,

    /// New deadline as YYYY-MM-DD or an RFC 3339 timestamp
    #[arg(long, conflicts_with = "clear_deadline")]
    pub deadline: Option<String>,

    /// Remove the deadline
    #[arg(long)]
    pub clear_deadline: bool,

    /// New project id
    #[arg(long, conflicts_with = "clear_project")]
    pub project: Option<i64>,

    /// Detach from its project
    #[arg(long)]
    pub clear_project: bool,
}

/// Parse a user-entered deadline. Bare dates resolve to the end of that day
/// in local time.
fn parse_deadline(input: &str) -> Result<i64> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.timestamp_millis());
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid deadline '{}': use YYYY-MM-DD or RFC 3339", input))?;
    let end_of_day = date.and_hms_opt(23, 59, 59).context("invalid time of day")?;
    let local = Local
        .from_local_datetime(&end_of_day)
        .single()
        .with_context(|| format!("Ambiguous local time for deadline '{}'", input))?;
    Ok(local.timestamp_millis())
}

pub fn run_add(db: &Database, args: AddArgs) -> Result<()> {
    let deadline = args.deadline.as_deref().map(parse_deadline).transpose()?;

    let input = TodoInput {
        text: args.text,
        category: args.category,
        priority: args.priority,
        value: args.value,
        time_required: args.time_required,
        deadline,
        project_id: args.project,
        dependencies: args.depends_on,
    };

    let id = db.create_todo(&input)?;
    println!("Added todo #{}", id);
    Ok(())
}

pub fn run_list(db: &Database, args: ListArgs) -> Result<()> {
    let todos = db.list_active(args.category.as_deref())?;

    if todos.is_empty() {
        match &args.category {
            Some(category) => println!("No todos found in category '{}'.", category),
            None => println!("No todos found."),
        }
        return Ok(());
    }

    let now = now_ms();
    let ranked = rank_todos(todos, now, &ScoreConfig::default(), args.sort == SortMode::Score);
    print!("{}", render_todo_table(&ranked, now));
    Ok(())
}

pub fn run_complete(db: &Database, id: i64) -> Result<()> {
    if db.complete_todo(id)? {
        println!("Todo #{} marked as complete", id);
    } else {
        println!("Todo #{} not found", id);
    }
    Ok(())
}

pub fn run_update(db: &Database, args: UpdateArgs) -> Result<()> {
    let deadline = match (&args.deadline, args.clear_deadline) {
        (Some(input), _) => Some(Some(parse_deadline(input)?)),
        (None, true) => Some(None),
        (None, false) => None,
    };
    let project_id = match (args.project, args.clear_project) {
        (Some(id), _) => Some(Some(id)),
        (None, true) => Some(None),
        (None, false) => None,
    };

    let update = TodoUpdate {
        text: args.text,
        category: args.category,
        priority: args.priority,
        value: args.value,
        time_required: args.time_required,
        deadline,
        project_id,
    };

    if update.is_empty() {
        bail!("Nothing to update: pass at least one field flag");
    }

    if db.update_todo(args.id, &update)? {
        println!("Todo #{} updated", args.id);
    } else {
        println!("Todo #{} not found", args.id);
    }
    Ok(())
}

pub fn run_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_todo(id)? {
        println!("Todo #{} deleted", id);
    } else {
        println!("Todo #{} not found", id);
    }
    Ok(())
}
