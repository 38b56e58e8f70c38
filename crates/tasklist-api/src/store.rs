use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklist_db::Database;
use thiserror::Error;
use tracing::error;

use crate::auth::AppState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call exceeded {0:?}")]
    Timeout(Duration),
    #[error("store worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        error!("Store error: {:#}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Runs a blocking store call off the async runtime, bounded by the
/// configured per-request deadline. A call that overruns keeps its blocking
/// thread until SQLite returns, but the request is answered immediately.
pub async fn run<F, T>(state: &AppState, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.clone();
    let call = tokio::task::spawn_blocking(move || f(&db.db));

    match tokio::time::timeout(state.store_timeout, call).await {
        Ok(joined) => Ok(joined??),
        Err(_) => Err(StoreError::Timeout(state.store_timeout)),
    }
}
