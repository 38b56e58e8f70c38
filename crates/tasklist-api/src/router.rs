use std::path::Path;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::auth::{self, AppState};
use crate::middleware::require_session;
use crate::tasks;

/// Builds the full route table. Task routes sit behind `require_session`;
/// auth routes, the health check and static assets do not.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let public_routes = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/health", get(health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/", get(tasks::index))
        .route("/add", post(tasks::add))
        .route("/toggle", get(tasks::toggle).post(tasks::toggle))
        .route("/delete", get(tasks::delete).post(tasks::delete))
        .route("/edit", post(tasks::edit))
        .layer(middleware::from_fn(require_session))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new(static_dir))
}

async fn health() -> &'static str {
    "ok"
}
