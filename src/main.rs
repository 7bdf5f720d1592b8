//! todo-rank
//!
//! A todo list that knows what you should do next: every open item is scored
//! with a weighted multi-criteria formula and the list command shows the most
//! worth-doing todo first. Exposes the same operations over a JSON API.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use todo_rank::cli::todos::ListArgs;
use todo_rank::cli::{Cli, Command, categories, projects, todos};
use todo_rank::config::Config;
use todo_rank::db::Database;
use todo_rank::web;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Route log output per `--log`: off, stdout, stderr, or an append-mode file.
fn init_logging(log: &str, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder().with_max_level(level);

    match log {
        "0" | "off" => {}
        "1" | "stdout" => {
            tracing::subscriber::set_global_default(
                builder.with_writer(std::io::stdout).finish(),
            )?;
        }
        "2" | "stderr" => {
            tracing::subscriber::set_global_default(
                builder.with_writer(std::io::stderr).finish(),
            )?;
        }
        filename => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            tracing::subscriber::set_global_default(
                builder.with_writer(file).with_ansi(false).finish(),
            )?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log, cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;
    if let Some(db_path) = &cli.database {
        config.server.db_path = db_path.into();
    }

    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;

    match cli.command {
        Some(Command::Serve { port }) => {
            let port = port.unwrap_or(config.server.port);
            info!(
                "Starting todo-rank v{}, database {:?}",
                env!("CARGO_PKG_VERSION"),
                config.server.db_path
            );
            web::start_server(Arc::new(db), port).await?;
        }
        Some(Command::Add(args)) => todos::run_add(&db, args)?,
        Some(Command::List(args)) => todos::run_list(&db, args)?,
        Some(Command::Complete { id }) => todos::run_complete(&db, id)?,
        Some(Command::Update(args)) => todos::run_update(&db, args)?,
        Some(Command::Delete { id }) => todos::run_delete(&db, id)?,
        Some(Command::Category(command)) => categories::run(&db, command)?,
        Some(Command::Project(command)) => projects::run(&db, command)?,
        // A bare `todo-rank` is a list request.
        None => todos::run_list(&db, ListArgs::default())?,
    }

    Ok(())
}
