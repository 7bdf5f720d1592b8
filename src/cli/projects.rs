//! Project subcommands.

use crate::db::Database;
use crate::types::ProjectInput;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects
    List,

    /// Add a project
    Add {
        /// Project name
        name: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
        /// Associated category id
        #[arg(long)]
        category_id: Option<i64>,
        /// Positive score multiplier for member todos
        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,
    },

    /// Replace a project's fields
    Set {
        /// Project id
        id: i64,
        /// Project name
        name: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
        /// Associated category id
        #[arg(long)]
        category_id: Option<i64>,
        /// Positive score multiplier for member todos
        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,
    },

    /// Remove a project (member todos fall back to unit weight)
    Remove {
        /// Project id
        id: i64,
    },
}

pub fn run(db: &Database, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List => {
            let projects = db.list_projects()?;
            if projects.is_empty() {
                println!("No projects defined.");
                return Ok(());
            }
            for project in projects {
                let description = project
                    .description
                    .map(|d| format!(" - {}", d))
                    .unwrap_or_default();
                println!(
                    "#{}  {}  (weight {}){}",
                    project.id, project.name, project.weight, description
                );
            }
        }
        ProjectCommand::Add {
            name,
            description,
            category_id,
            weight,
        } => {
            let id = db.create_project(&ProjectInput {
                name,
                description,
                category_id,
                weight,
            })?;
            println!("Added project #{}", id);
        }
        ProjectCommand::Set {
            id,
            name,
            description,
            category_id,
            weight,
        } => {
            let input = ProjectInput {
                name,
                description,
                category_id,
                weight,
            };
            if db.update_project(id, &input)? {
                println!("Updated project #{}", id);
            } else {
                println!("Project #{} not found", id);
            }
        }
        ProjectCommand::Remove { id } => {
            if db.delete_project(id)? {
                println!("Removed project #{}", id);
            } else {
                println!("Project #{} not found", id);
            }
        }
    }
    Ok(())
}
