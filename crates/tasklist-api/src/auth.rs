use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use tasklist_db::{Database, UserInsert, UserRow};
use tasklist_types::api::{LoginForm, RegisterForm};

use crate::error::AuthError;
use crate::{pages, session, store};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Deadline applied to every store call.
    pub store_timeout: Duration,
}

/// Usernames and passwords are restricted to `[A-Za-z0-9_]+`.
pub fn is_valid_input(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unsalted SHA-256, hex encoded (64 chars). Login matches on the digest
/// directly, so the function must be deterministic.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Validates the form and creates the user. The pre-check on the username is
/// only there for a friendlier message: the `UNIQUE` constraint decides.
pub async fn register_user(state: &AppState, form: &RegisterForm) -> Result<Uuid, AuthError> {
    if form.username.is_empty() || form.password.is_empty() || form.confirm_password.is_empty() {
        return Err(AuthError::MissingField);
    }
    if form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if !is_valid_input(&form.username) || !is_valid_input(&form.password) {
        return Err(AuthError::InvalidCharacters);
    }

    let password_hash = hash_password(&form.password);

    let username = form.username.clone();
    let existing = store::run(state, move |db| db.find_user_by_username(&username)).await?;
    if existing.is_some() {
        return Err(AuthError::DuplicateUsername);
    }

    let user_id = Uuid::new_v4();
    let username = form.username.clone();
    let outcome = store::run(state, move |db| {
        db.insert_user(user_id, &username, &password_hash, chrono::Utc::now())
    })
    .await
    .map_err(AuthError::StoreWriteFailed)?;

    match outcome {
        UserInsert::Created => Ok(user_id),
        UserInsert::UsernameTaken => Err(AuthError::DuplicateUsername),
    }
}

/// Returns the id of the user whose username and password hash both match.
pub async fn authenticate(state: &AppState, form: &LoginForm) -> Result<Uuid, AuthError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AuthError::MissingField);
    }
    if !is_valid_input(&form.username) || !is_valid_input(&form.password) {
        return Err(AuthError::InvalidCharacters);
    }

    let username = form.username.clone();
    let password_hash = hash_password(&form.password);
    let user = store::run(state, move |db| {
        db.find_user_by_credentials(&username, &password_hash)?
            .map(UserRow::into_user)
            .transpose()
    })
    .await?;

    user.map(|u| u.id).ok_or(AuthError::InvalidCredentials)
}

// -- Handlers --

pub async fn register_page() -> Html<String> {
    Html(pages::register_page(None))
}

pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    match register_user(&state, &form).await {
        Ok(user_id) => {
            info!("Registered user {} ({})", form.username, user_id);
            Redirect::to("/login").into_response()
        }
        Err(e) if e.is_form_error() => {
            if let AuthError::StoreWriteFailed(source) = &e {
                warn!("Failed to insert user {}: {:#}", form.username, source);
            }
            Html(pages::register_page(Some(&e.to_string()))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn login_page() -> Html<String> {
    Html(pages::login_page(None))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match authenticate(&state, &form).await {
        Ok(user_id) => {
            info!("User {} logged in", user_id);
            (session::issue(jar, user_id), Redirect::to("/")).into_response()
        }
        Err(e) if e.is_form_error() => {
            if matches!(e, AuthError::InvalidCredentials) {
                warn!("Failed login for {:?}", form.username);
            }
            Html(pages::login_page(Some(&e.to_string()))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (session::revoke(jar), Redirect::to("/login"))
}
