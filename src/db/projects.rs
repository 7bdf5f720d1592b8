//! Project CRUD.
//!
//! A project's weight multiplies the score of every member todo, so it must
//! stay strictly positive.

use super::Database;
use crate::error::ApiError;
use crate::types::{Project, ProjectInput};
use anyhow::Result;
use rusqlite::{OptionalExtension, params};

fn check_weight(weight: f64) -> Result<()> {
    if weight <= 0.0 {
        return Err(ApiError::invalid_value("weight", "Project weight must be positive").into());
    }
    Ok(())
}

impl Database {
    /// List all projects ordered by id.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, category_id, weight FROM projects ORDER BY id",
            )?;

            let projects = stmt
                .query_map([], |row| {
                    Ok(Project {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        category_id: row.get(3)?,
                        weight: row.get(4)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(projects)
        })
    }

    /// Get a project by id.
    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.with_conn(|conn| {
            let project = conn
                .query_row(
                    "SELECT id, name, description, category_id, weight
                     FROM projects WHERE id = ?1",
                    params![id],
                    |row| {
                        Ok(Project {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            description: row.get(2)?,
                            category_id: row.get(3)?,
                            weight: row.get(4)?,
                        })
                    },
                )
                .optional()?;
            Ok(project)
        })
    }

    /// Create a project.
    pub fn create_project(&self, input: &ProjectInput) -> Result<i64> {
        check_weight(input.weight)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO projects (name, description, category_id, weight)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    &input.name,
                    &input.description,
                    input.category_id,
                    input.weight
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Replace a project's fields. Returns false if it does not exist.
    pub fn update_project(&self, id: i64, input: &ProjectInput) -> Result<bool> {
        check_weight(input.weight)?;

        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE projects SET name = ?1, description = ?2, category_id = ?3, weight = ?4
                 WHERE id = ?5",
                params![
                    &input.name,
                    &input.description,
                    input.category_id,
                    input.weight,
                    id
                ],
            )?;
            Ok(affected > 0)
        })
    }

    /// Delete a project. Member todos fall back to unit weight via the
    /// ON DELETE SET NULL foreign key.
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            Ok(affected > 0)
        })
    }
}
