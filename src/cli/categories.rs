//! Category subcommands.

use crate::db::Database;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,
        /// Display weight, 0-5
        #[arg(short, long, default_value_t = 1.0)]
        weight: f64,
    },

    /// Change a category's name or weight
    Set {
        /// Category name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// New weight, 0-5
        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// Remove a category (must have no todos)
    Remove {
        /// Category name
        name: String,
    },
}

pub fn run(db: &Database, command: CategoryCommand) -> Result<()> {
    match command {
        CategoryCommand::List => {
            let categories = db.list_categories()?;
            if categories.is_empty() {
                println!("No categories defined.");
                return Ok(());
            }
            for category in categories {
                let count = db.category_todo_count(&category.name)?;
                println!(
                    "{}  (weight {}, {} todo(s))",
                    category.name, category.weight, count
                );
            }
        }
        CategoryCommand::Add { name, weight } => {
            db.create_category(&name, weight)?;
            println!("Added category '{}'", name);
        }
        CategoryCommand::Set {
            name,
            rename,
            weight,
        } => {
            if db.update_category(&name, rename.as_deref(), weight)? {
                println!("Updated category '{}'", name);
            } else {
                println!("Category '{}' not found", name);
            }
        }
        CategoryCommand::Remove { name } => {
            if db.delete_category(&name)? {
                println!("Removed category '{}'", name);
            } else {
                println!("Category '{}' not found", name);
            }
        }
    }
    Ok(())
}
