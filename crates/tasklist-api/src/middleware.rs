use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::session;

/// Identity resolved from the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub id: Uuid,
}

/// Resolve the session cookie before any task handler runs. Unauthenticated
/// requests are redirected to `/login` and never reach the store.
pub async fn require_session(jar: CookieJar, mut req: Request, next: Next) -> Response {
    match session::resolve_identity(&jar) {
        Ok(id) => {
            req.extensions_mut().insert(SessionUser { id });
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
