//! Session cookie handling.
//!
//! The cookie carries the user's id in plain hex and is not signed, so anyone
//! who learns an id can present it. Swapping in `axum_extra`'s
//! `SignedCookieJar` would close that gap without changing the routes.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::AuthError;

pub const SESSION_COOKIE: &str = "user_id";

const SESSION_TTL: Duration = Duration::hours(24);

/// Adds a session cookie for `user_id`, valid for 24 hours.
pub fn issue(jar: CookieJar, user_id: Uuid) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, user_id.simple().to_string()))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::now_utc() + SESSION_TTL)
        .build();
    jar.add(cookie)
}

/// Overwrites the session cookie with an empty, already-expired one.
pub fn revoke(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::now_utc() - Duration::hours(1))
        .build();
    jar.add(cookie)
}

/// Missing or unparsable cookie => `AuthRequired`.
pub fn resolve_identity(jar: &CookieJar) -> Result<Uuid, AuthError> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(AuthError::AuthRequired)?;
    Uuid::try_parse(cookie.value()).map_err(|_| AuthError::AuthRequired)
}
