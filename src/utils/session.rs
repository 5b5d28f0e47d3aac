// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Identity resolved from the session cookie, read-only for the rest of
/// the request.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrentUser {
    /// Subject - stores the user ID (as string).
    pub sub: String,
    pub username: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.sub.parse::<i64>().unwrap_or(0)
    }
}

/// Signs a new session token for the user.
pub fn sign_session(
    id: i64,
    username: &str,
    secret: &str,
    ttl_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + ttl_seconds as usize;

    let claims = CurrentUser {
        sub: id.to_string(),
        username: username.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a session token. Tampered or expired tokens
/// resolve to anonymous.
pub fn verify_session(token: &str, secret: &str) -> Option<CurrentUser> {
    decode::<CurrentUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Resolves the session cookie on the jar to the current user, if any.
pub fn resolve(jar: &CookieJar, secret: &str) -> Option<CurrentUser> {
    let token = jar.get(SESSION_COOKIE)?.value();
    verify_session(token, secret)
}

/// Establishes an authenticated session on the jar.
pub fn establish(jar: CookieJar, token: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Clears the session, returning the browser to the anonymous state.
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// Axum Middleware: Authentication.
///
/// Layered onto protected routes at registration time, so it always runs
/// before the handler body. Resolves the session cookie; if valid, injects
/// `CurrentUser` into the request extensions for handlers to use. If not,
/// redirects to the login page, remembering the originally requested path
/// so it can be replayed after a successful login.
pub async fn auth_middleware(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match resolve(&jar, &config.session_secret) {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => Redirect::to(&format!("/login?next={}", req.uri().path())).into_response(),
    }
}
