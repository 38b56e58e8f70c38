use crate::Database;
use crate::models::{TaskKey, TaskPatch, TaskRow, UserInsert, UserRow, format_timestamp};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, named_params};
use tasklist_types::models::Task;
use uuid::Uuid;

impl Database {
    // -- Users --

    pub fn insert_user(
        &self,
        id: Uuid,
        username: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<UserInsert> {
        self.with_conn_mut(|conn| {
            let result = conn.execute(
                "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
                (id.to_string(), username, password_hash, format_timestamp(created_at)),
            );

            match result {
                Ok(_) => Ok(UserInsert::Created),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(UserInsert::UsernameTaken)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
                    [username],
                    user_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Matches on username AND password hash in one lookup, so a miss does not
    /// say which of the two was wrong.
    pub fn find_user_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, password_hash, created_at FROM users
                     WHERE username = ?1 AND password_hash = ?2",
                    [username, password_hash],
                    user_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    // -- Tasks --

    pub fn insert_task(&self, task: &Task) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO tasks (id, owner_id, title, description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    task.id.to_string(),
                    task.owner_id.to_string(),
                    task.title,
                    task.description,
                    task.status,
                    format_timestamp(task.created_at),
                    format_timestamp(task.updated_at),
                ],
            )?;
            Ok(())
        })
    }

    pub fn find_tasks(&self, owner_id: Uuid) -> Result<Vec<TaskRow>> {
        self.with_conn(|conn| query_tasks(conn, owner_id))
    }

    pub fn find_task(&self, key: TaskKey) -> Result<Option<TaskRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, owner_id, title, description, status, created_at, updated_at
                     FROM tasks WHERE id = :id AND owner_id = :owner_id",
                    named_params! {
                        ":id": key.id.to_string(),
                        ":owner_id": key.owner_id.to_string(),
                    },
                    task_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Applies `patch` to the task matching `key` in a single statement.
    /// Returns the number of rows matched (0 or 1).
    pub fn update_task(&self, key: TaskKey, patch: &TaskPatch, now: DateTime<Utc>) -> Result<usize> {
        let id = key.id.to_string();
        let owner_id = key.owner_id.to_string();
        let now = format_timestamp(now);

        self.with_conn_mut(|conn| {
            let changed = match patch {
                TaskPatch::ToggleStatus => conn.execute(
                    "UPDATE tasks SET status = NOT status, updated_at = :now
                     WHERE id = :id AND owner_id = :owner_id",
                    named_params! { ":now": now, ":id": id, ":owner_id": owner_id },
                )?,
                TaskPatch::Content { title, description } => conn.execute(
                    "UPDATE tasks SET title = :title, description = :description, updated_at = :now
                     WHERE id = :id AND owner_id = :owner_id",
                    named_params! {
                        ":title": title,
                        ":description": description,
                        ":now": now,
                        ":id": id,
                        ":owner_id": owner_id,
                    },
                )?,
            };
            Ok(changed)
        })
    }

    /// Returns the number of rows deleted (0 or 1).
    pub fn delete_task(&self, key: TaskKey) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM tasks WHERE id = :id AND owner_id = :owner_id",
                named_params! {
                    ":id": key.id.to_string(),
                    ":owner_id": key.owner_id.to_string(),
                },
            )?;
            Ok(deleted)
        })
    }
}

fn query_tasks(conn: &Connection, owner_id: Uuid) -> Result<Vec<TaskRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, title, description, status, created_at, updated_at
         FROM tasks
         WHERE owner_id = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt
        .query_map([owner_id.to_string()], task_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
