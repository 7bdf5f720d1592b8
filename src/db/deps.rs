//! Dependency link operations.
//!
//! A link records that `todo_id` cannot start until `depends_on_id` is done.
//! The links feed the ordering policy only; scores never read them.

use super::Database;
use crate::error::ApiError;
use anyhow::Result;
use rusqlite::{Connection, params};

/// Fetch the dependency ids for a todo using an existing connection.
pub(super) fn dependencies_for(conn: &Connection, todo_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT depends_on_id FROM todo_dependencies
         WHERE todo_id = ?1 ORDER BY depends_on_id",
    )?;

    let deps = stmt
        .query_map(params![todo_id], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();

    Ok(deps)
}

impl Database {
    /// Record dependencies for a todo. Every referenced todo must exist.
    pub fn add_dependencies(&self, todo_id: i64, depends_on: &[i64]) -> Result<()> {
        self.with_conn(|conn| {
            for dep_id in depends_on {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM todos WHERE id = ?1",
                    params![dep_id],
                    |row| row.get(0),
                )?;
                if count == 0 {
                    return Err(ApiError::dependency_not_found(*dep_id).into());
                }
            }

            for dep_id in depends_on {
                conn.execute(
                    "INSERT OR IGNORE INTO todo_dependencies (todo_id, depends_on_id)
                     VALUES (?1, ?2)",
                    params![todo_id, dep_id],
                )?;
            }

            Ok(())
        })
    }

    /// Get the dependency ids recorded for a todo.
    pub fn get_dependencies(&self, todo_id: i64) -> Result<Vec<i64>> {
        self.with_conn(|conn| dependencies_for(conn, todo_id))
    }
}
