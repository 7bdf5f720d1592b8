//! Category CRUD with guard rails.
//!
//! Category weights live in [0, 5]. A category cannot be deleted while todos
//! still reference it, and names must stay unique through renames.

use super::Database;
use crate::error::ApiError;
use crate::types::Category;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

fn check_weight(weight: f64) -> Result<()> {
    if !(0.0..=5.0).contains(&weight) {
        return Err(ApiError::invalid_value("weight", "Weight must be between 0 and 5").into());
    }
    Ok(())
}

fn get_category_internal(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT name, weight FROM categories WHERE name = ?1",
            params![name],
            |row| {
                Ok(Category {
                    name: row.get(0)?,
                    weight: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

impl Database {
    /// List all categories ordered by name.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, weight FROM categories ORDER BY name")?;

            let categories = stmt
                .query_map([], |row| {
                    Ok(Category {
                        name: row.get(0)?,
                        weight: row.get(1)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(categories)
        })
    }

    /// Get a category by name.
    pub fn get_category(&self, name: &str) -> Result<Option<Category>> {
        self.with_conn(|conn| get_category_internal(conn, name))
    }

    /// Create a category. Names are unique; weight must be in [0, 5].
    pub fn create_category(&self, name: &str, weight: f64) -> Result<Category> {
        check_weight(weight)?;

        self.with_conn(|conn| {
            if get_category_internal(conn, name)?.is_some() {
                return Err(
                    ApiError::already_exists(format!("Category '{}' already exists", name)).into(),
                );
            }

            conn.execute(
                "INSERT INTO categories (name, weight) VALUES (?1, ?2)",
                params![name, weight],
            )?;

            Ok(Category {
                name: name.to_string(),
                weight,
            })
        })
    }

    /// Update a category's name and/or weight. Returns false if it does not
    /// exist. Renames refuse to collide with an existing category.
    pub fn update_category(
        &self,
        name: &str,
        new_name: Option<&str>,
        weight: Option<f64>,
    ) -> Result<bool> {
        if let Some(weight) = weight {
            check_weight(weight)?;
        }

        self.with_conn(|conn| {
            let Some(current) = get_category_internal(conn, name)? else {
                return Ok(false);
            };

            if let Some(new_name) = new_name
                && new_name != name
                && get_category_internal(conn, new_name)?.is_some()
            {
                return Err(ApiError::already_exists(format!(
                    "Category '{}' already exists",
                    new_name
                ))
                .into());
            }

            // Renames cascade onto todos via the category foreign key.
            let affected = conn.execute(
                "UPDATE categories SET name = ?1, weight = ?2 WHERE name = ?3",
                params![
                    new_name.unwrap_or(name),
                    weight.unwrap_or(current.weight),
                    name
                ],
            )?;

            Ok(affected > 0)
        })
    }

    /// Delete a category. Refused while any todo still references it.
    pub fn delete_category(&self, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let todo_count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM todos WHERE category = ?1",
                params![name],
                |row| row.get(0),
            )?;
            if todo_count > 0 {
                return Err(ApiError::category_in_use(name, todo_count).into());
            }

            let affected = conn.execute("DELETE FROM categories WHERE name = ?1", params![name])?;
            Ok(affected > 0)
        })
    }

    /// Count todos (completed included) recorded under a category.
    pub fn category_todo_count(&self, name: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM todos WHERE category = ?1",
                params![name],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }
}
