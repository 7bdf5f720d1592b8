//! Todo CRUD and active-list queries.

use super::{Database, now_ms};
use crate::error::ApiError;
use crate::types::{Project, Todo, TodoInput, TodoUpdate};
use anyhow::Result;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Row, params, params_from_iter};
use std::collections::HashMap;

pub(super) fn parse_todo_row(row: &Row) -> rusqlite::Result<Todo> {
    let completed: i64 = row.get("completed")?;

    Ok(Todo {
        id: row.get("id")?,
        text: row.get("text")?,
        completed: completed != 0,
        category: row.get("category")?,
        priority: row.get("priority")?,
        value: row.get("value")?,
        time_required: row.get("time_required")?,
        deadline: row.get("deadline")?,
        created_at: row.get("created_at")?,
        project_id: row.get("project_id")?,
        dependencies: Vec::new(),
        project: None,
        score: None,
    })
}

fn todo_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM todos WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn category_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM categories WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn project_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM projects WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn check_priority(priority: f64) -> Result<()> {
    if !(0.0..=10.0).contains(&priority) {
        return Err(ApiError::invalid_value("priority", "Priority must be between 0 and 10").into());
    }
    Ok(())
}

fn check_value(value: f64) -> Result<()> {
    if !(0.0..=10.0).contains(&value) {
        return Err(ApiError::invalid_value("value", "Value must be between 0 and 10").into());
    }
    Ok(())
}

fn check_time_required(hours: f64) -> Result<()> {
    if hours <= 0.0 || hours > 100.0 {
        return Err(ApiError::invalid_value(
            "time_required",
            "Time required must be between 0 and 100 hours",
        )
        .into());
    }
    Ok(())
}

/// Load all projects keyed by id, for joining onto todo lists.
fn load_projects(conn: &Connection) -> Result<HashMap<i64, Project>> {
    let mut stmt =
        conn.prepare("SELECT id, name, description, category_id, weight FROM projects")?;

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
        .map(|p| (p.id, p))
        .collect();

    Ok(projects)
}

impl Database {
    /// Create a new todo, verifying its category, project, and dependency
    /// references. The todo and its dependency links are written in one
    /// transaction.
    pub fn create_todo(&self, input: &TodoInput) -> Result<i64> {
        check_priority(input.priority)?;
        check_value(input.value)?;
        check_time_required(input.time_required)?;

        self.with_conn_mut(|conn| {
            if !category_exists(conn, &input.category)? {
                return Err(ApiError::category_not_found(&input.category).into());
            }
            if let Some(project_id) = input.project_id
                && !project_exists(conn, project_id)?
            {
                return Err(ApiError::project_not_found(project_id).into());
            }
            for dep_id in &input.dependencies {
                if !todo_exists(conn, *dep_id)? {
                    return Err(ApiError::dependency_not_found(*dep_id).into());
                }
            }

            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO todos (text, completed, category, priority, value,
                                    time_required, deadline, project_id, created_at)
                 VALUES (?1, 0, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    &input.text,
                    &input.category,
                    input.priority,
                    input.value,
                    input.time_required,
                    input.deadline,
                    input.project_id,
                    now_ms(),
                ],
            )?;
            let todo_id = tx.last_insert_rowid();

            for dep_id in &input.dependencies {
                tx.execute(
                    "INSERT OR IGNORE INTO todo_dependencies (todo_id, depends_on_id)
                     VALUES (?1, ?2)",
                    params![todo_id, dep_id],
                )?;
            }

            tx.commit()?;
            Ok(todo_id)
        })
    }

    /// Get a todo by id, with its dependency ids and project resolved.
    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM todos WHERE id = ?1")?;
            let result = stmt.query_row(params![id], parse_todo_row);

            let mut todo = match result {
                Ok(todo) => todo,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e.into()),
            };

            todo.dependencies = super::deps::dependencies_for(conn, id)?;
            if let Some(project_id) = todo.project_id {
                todo.project = load_projects(conn)?.remove(&project_id);
            }

            Ok(Some(todo))
        })
    }

    /// List all non-completed todos, optionally filtered by category, with
    /// dependency ids aggregated and projects joined. Rows come back in id
    /// order; ranking is a separate, view-time step.
    pub fn list_active(&self, category: Option<&str>) -> Result<Vec<Todo>> {
        self.with_conn(|conn| {
            let sql = if category.is_some() {
                "SELECT t.*, GROUP_CONCAT(d.depends_on_id) AS dependencies
                 FROM todos t
                 LEFT JOIN todo_dependencies d ON d.todo_id = t.id
                 WHERE t.completed = 0 AND t.category = ?1
                 GROUP BY t.id
                 ORDER BY t.id"
            } else {
                "SELECT t.*, GROUP_CONCAT(d.depends_on_id) AS dependencies
                 FROM todos t
                 LEFT JOIN todo_dependencies d ON d.todo_id = t.id
                 WHERE t.completed = 0
                 GROUP BY t.id
                 ORDER BY t.id"
            };

            let parse = |row: &Row| -> rusqlite::Result<Todo> {
                let mut todo = parse_todo_row(row)?;
                let deps: Option<String> = row.get("dependencies")?;
                todo.dependencies = deps
                    .map(|s| s.split(',').filter_map(|id| id.parse().ok()).collect())
                    .unwrap_or_default();
                Ok(todo)
            };

            let mut stmt = conn.prepare(sql)?;
            let mut todos: Vec<Todo> = if let Some(cat) = category {
                stmt.query_map(params![cat], parse)?
                    .filter_map(|r| r.ok())
                    .collect()
            } else {
                stmt.query_map([], parse)?.filter_map(|r| r.ok()).collect()
            };

            let projects = load_projects(conn)?;
            for todo in &mut todos {
                todo.project = todo.project_id.and_then(|id| projects.get(&id).cloned());
            }

            Ok(todos)
        })
    }

    /// Apply a partial update. Returns false if the todo does not exist.
    pub fn update_todo(&self, id: i64, update: &TodoUpdate) -> Result<bool> {
        if update.is_empty() {
            return Ok(false);
        }
        if let Some(priority) = update.priority {
            check_priority(priority)?;
        }
        if let Some(value) = update.value {
            check_value(value)?;
        }
        if let Some(hours) = update.time_required {
            check_time_required(hours)?;
        }

        self.with_conn(|conn| {
            if !todo_exists(conn, id)? {
                return Ok(false);
            }
            if let Some(category) = &update.category
                && !category_exists(conn, category)?
            {
                return Err(ApiError::category_not_found(category).into());
            }
            if let Some(Some(project_id)) = update.project_id
                && !project_exists(conn, project_id)?
            {
                return Err(ApiError::project_not_found(project_id).into());
            }

            let mut sets: Vec<&str> = Vec::new();
            let mut values: Vec<SqlValue> = Vec::new();

            if let Some(text) = &update.text {
                sets.push("text = ?");
                values.push(SqlValue::Text(text.clone()));
            }
            if let Some(category) = &update.category {
                sets.push("category = ?");
                values.push(SqlValue::Text(category.clone()));
            }
            if let Some(priority) = update.priority {
                sets.push("priority = ?");
                values.push(SqlValue::Real(priority));
            }
            if let Some(value) = update.value {
                sets.push("value = ?");
                values.push(SqlValue::Real(value));
            }
            if let Some(hours) = update.time_required {
                sets.push("time_required = ?");
                values.push(SqlValue::Real(hours));
            }
            if let Some(deadline) = update.deadline {
                sets.push("deadline = ?");
                values.push(deadline.map(SqlValue::Integer).unwrap_or(SqlValue::Null));
            }
            if let Some(project_id) = update.project_id {
                sets.push("project_id = ?");
                values.push(project_id.map(SqlValue::Integer).unwrap_or(SqlValue::Null));
            }

            values.push(SqlValue::Integer(id));
            let sql = format!("UPDATE todos SET {} WHERE id = ?", sets.join(", "));
            let affected = conn.execute(&sql, params_from_iter(values.iter()))?;

            Ok(affected > 0)
        })
    }

    /// Mark a todo as complete. Returns false if the todo does not exist.
    pub fn complete_todo(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE todos SET completed = 1 WHERE id = ?1",
                params![id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Delete a todo and (via cascade) its dependency links.
    pub fn delete_todo(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
            Ok(affected > 0)
        })
    }
}
