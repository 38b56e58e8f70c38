//! Database row types. These map directly to SQLite rows and stay distinct
//! from the tasklist-types models to keep the DB layer independent.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use tasklist_types::models::{Task, User};
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            username: self.username,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

pub struct TaskRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub status: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskRow {
    pub fn into_task(self) -> Result<Task> {
        Ok(Task {
            id: parse_id(&self.id)?,
            owner_id: parse_id(&self.owner_id)?,
            title: self.title,
            description: self.description,
            status: self.status,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Outcome of inserting a user. The `UNIQUE` constraint on `username` is the
/// authoritative duplicate check; a lost registration race lands here as
/// `UsernameTaken` rather than as a generic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsert {
    Created,
    UsernameTaken,
}

/// The only filter shape the store accepts for a single task: its id AND its
/// owner. There is deliberately no way to address a task by id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskKey {
    pub id: Uuid,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPatch {
    /// Flip `status` in place.
    ToggleStatus,
    /// Overwrite title and description.
    Content { title: String, description: String },
}

/// Timestamps are stored as fixed-width RFC 3339 strings so that text
/// ordering matches chronological ordering.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("corrupt timestamp '{}'", raw))?;
    Ok(ts.with_timezone(&Utc))
}

fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse().with_context(|| format!("corrupt id '{}'", raw))
}
