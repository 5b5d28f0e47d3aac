// src/handlers/auth.rs

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::{
        role::Role,
        user::{LoginForm, RegisterForm, User},
    },
    utils::{
        flash::{self, Flash},
        hash::{hash_password, verify_password},
        session,
    },
    views,
};

/// Query parameters accepted by the login route.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Path to replay after a successful login.
    pub next: Option<String>,
}

pub async fn register_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);
    (jar, Html(views::register(notice.as_ref())))
}

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it and attaches the
/// default 'user' role. A duplicate username or email is reported back on
/// the registration form instead of failing the request.
pub async fn register(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
    Form(payload): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let hashed_password = hash_password(&payload.password)?;

    let result = sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&hashed_password)
        .execute(&pool)
        .await;

    let user_id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(e) if e.to_string().contains("UNIQUE constraint failed") => {
            let jar = flash::set(jar, Flash::danger("Username or email is already taken"));
            return Ok((jar, Redirect::to("/register")));
        }
        Err(e) => {
            tracing::error!("Failed to register user: {:?}", e);
            return Err(AppError::from(e));
        }
    };

    // Attach the default role
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?")
        .bind("user")
        .fetch_optional(&pool)
        .await?;

    if let Some(role) = role {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(role.id)
            .execute(&pool)
            .await?;
    }

    let jar = flash::set(
        jar,
        Flash::success("Your account has been created successfully"),
    );
    Ok((jar, Redirect::to("/login")))
}

pub async fn login_form(Query(params): Query<LoginQuery>, jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);
    (jar, Html(views::login(params.next.as_deref(), notice.as_ref())))
}

/// Authenticates a user and establishes the session cookie.
///
/// Looks the user up by email and verifies the submitted password against
/// the stored hash. On success, redirects to the remembered path if one was
/// given, otherwise to the landing page.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Query(params): Query<LoginQuery>,
    jar: CookieJar,
    Form(payload): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password FROM users WHERE email = ?",
    )
    .bind(&payload.email)
    .fetch_optional(&pool)
    .await?;

    let verified = match &user {
        Some(user) => verify_password(&payload.password, &user.password)?,
        None => false,
    };

    match (verified, user) {
        (true, Some(user)) => {
            let token = session::sign_session(
                user.id,
                &user.username,
                &config.session_secret,
                config.session_ttl,
            )?;
            let jar = session::establish(jar, token);
            let target = params.next.unwrap_or_else(|| "/".to_string());
            Ok((jar, Redirect::to(&target)))
        }
        _ => {
            let jar = flash::set(
                jar,
                Flash::danger("Invalid email or password, please try again"),
            );
            Ok((jar, Redirect::to("/login")))
        }
    }
}

/// Clears the session and returns to the login page.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (session::clear(jar), Redirect::to("/login"))
}
