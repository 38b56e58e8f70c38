//! Task access: every operation is scoped to the session user, and every
//! single-task operation goes through a [`TaskKey`] (task id AND owner id).

use axum::{
    Extension, Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use tasklist_db::{TaskKey, TaskPatch, TaskRow};
use tasklist_types::api::{AddTaskForm, EditTaskForm, TaskIdQuery};
use tasklist_types::models::Task;

use crate::auth::AppState;
use crate::error::TaskError;
use crate::middleware::SessionUser;
use crate::{pages, store};

pub fn parse_task_id(raw: &str) -> Result<Uuid, TaskError> {
    Uuid::try_parse(raw).map_err(|_| TaskError::MalformedId)
}

pub async fn list_tasks(state: &AppState, owner_id: Uuid) -> Result<Vec<Task>, TaskError> {
    let tasks = store::run(state, move |db| {
        db.find_tasks(owner_id)?
            .into_iter()
            .map(TaskRow::into_task)
            .collect::<anyhow::Result<Vec<_>>>()
    })
    .await?;
    Ok(tasks)
}

/// Creates an open task. An empty title is a no-op and yields `None`.
pub async fn add_task(
    state: &AppState,
    owner_id: Uuid,
    title: String,
    description: String,
) -> Result<Option<Task>, TaskError> {
    if title.is_empty() {
        return Ok(None);
    }

    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4(),
        owner_id,
        title,
        description,
        status: false,
        created_at: now,
        updated_at: now,
    };

    let record = task.clone();
    store::run(state, move |db| db.insert_task(&record)).await?;
    Ok(Some(task))
}

pub async fn toggle_task(state: &AppState, key: TaskKey) -> Result<(), TaskError> {
    apply_patch(state, key, TaskPatch::ToggleStatus).await
}

/// Overwrites title and description. An empty title writes nothing, so no
/// stored task ever ends up untitled, but the task must still exist and
/// belong to the caller.
pub async fn edit_task(
    state: &AppState,
    key: TaskKey,
    title: String,
    description: String,
) -> Result<(), TaskError> {
    if title.is_empty() {
        let found = store::run(state, move |db| db.find_task(key)).await?;
        return found.map(|_| ()).ok_or(TaskError::NotFound);
    }
    apply_patch(state, key, TaskPatch::Content { title, description }).await
}

pub async fn delete_task(state: &AppState, key: TaskKey) -> Result<(), TaskError> {
    let deleted = store::run(state, move |db| db.delete_task(key)).await?;
    if deleted == 0 {
        return Err(TaskError::NotFound);
    }
    Ok(())
}

async fn apply_patch(state: &AppState, key: TaskKey, patch: TaskPatch) -> Result<(), TaskError> {
    let matched = store::run(state, move |db| db.update_task(key, &patch, Utc::now())).await?;
    if matched == 0 {
        return Err(TaskError::NotFound);
    }
    Ok(())
}

// -- Handlers --

/// GET / — the session user's task list.
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Html<String>, TaskError> {
    let tasks = list_tasks(&state, user.id).await?;
    Ok(Html(pages::index_page(&tasks)))
}

/// POST /add
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<AddTaskForm>,
) -> Result<Redirect, TaskError> {
    if let Some(task) = add_task(&state, user.id, form.title, form.description).await? {
        info!("User {} added task {}", user.id, task.id);
    }
    Ok(Redirect::to("/"))
}

/// GET|POST /toggle?id=
pub async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Redirect, TaskError> {
    let id = parse_task_id(&query.id)?;
    toggle_task(&state, TaskKey { id, owner_id: user.id }).await?;
    debug!("User {} toggled task {}", user.id, id);
    Ok(Redirect::to("/"))
}

/// POST /edit
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<EditTaskForm>,
) -> Result<Redirect, TaskError> {
    let id = parse_task_id(&form.id)?;
    edit_task(&state, TaskKey { id, owner_id: user.id }, form.title, form.description).await?;
    debug!("User {} edited task {}", user.id, id);
    Ok(Redirect::to("/"))
}

/// GET|POST /delete?id= — deleting a missing or foreign task still redirects.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Redirect, TaskError> {
    let id = parse_task_id(&query.id)?;
    match delete_task(&state, TaskKey { id, owner_id: user.id }).await {
        Ok(()) => info!("User {} deleted task {}", user.id, id),
        Err(TaskError::NotFound) => debug!("User {} deleted nothing at {}", user.id, id),
        Err(e) => return Err(e),
    }
    Ok(Redirect::to("/"))
}
