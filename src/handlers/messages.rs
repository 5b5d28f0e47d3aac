// src/handlers/messages.rs

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        message::{MessageWithUsers, NewMessageForm},
        user::User,
    },
    utils::{
        flash::{self, Flash},
        session::CurrentUser,
    },
    views,
};

/// Lists every message the current user has sent or received, newest first.
///
/// Rows are grouped on (sender, recipient, body, timestamp), which collapses
/// byte-identical duplicates but keeps one row per distinct message.
pub async fn list_messages(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, notice) = flash::take(jar);
    let user_id = user.id();

    let chats = sqlx::query_as::<_, MessageWithUsers>(
        "SELECT
            m.id, m.sender_id, m.recipient_id, m.body, m.timestamp,
            s.username AS sender_username,
            r.username AS recipient_username
         FROM messages m
         LEFT JOIN users s ON s.id = m.sender_id
         LEFT JOIN users r ON r.id = m.recipient_id
         WHERE m.sender_id = ? OR m.recipient_id = ?
         GROUP BY m.sender_id, m.recipient_id, m.body, m.timestamp
         ORDER BY m.timestamp DESC",
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok((jar, Html(views::messages(&user, &chats, notice.as_ref()))))
}

pub async fn new_message_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);
    (jar, Html(views::new_message(notice.as_ref())))
}

/// Sends a direct message to another registered user, addressed by email.
///
/// An unknown recipient leaves the store untouched and reports back on the
/// message list. The timestamp is assigned by the server at creation.
pub async fn send_message(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    Form(payload): Form<NewMessageForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    if payload.validate().is_err() {
        let jar = flash::set(jar, Flash::danger("Message must be at most 140 characters"));
        return Ok((jar, Redirect::to("/new_message")));
    }

    let recipient = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password FROM users WHERE email = ?",
    )
    .bind(&payload.recipient)
    .fetch_optional(&pool)
    .await?;

    let Some(recipient) = recipient else {
        let jar = flash::set(jar, Flash::danger("User not found"));
        return Ok((jar, Redirect::to("/messages")));
    };

    sqlx::query(
        "INSERT INTO messages (sender_id, recipient_id, body, timestamp) VALUES (?, ?, ?, ?)",
    )
    .bind(user.id())
    .bind(recipient.id)
    .bind(&payload.body)
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to send message: {:?}", e);
        AppError::from(e)
    })?;

    let jar = flash::set(jar, Flash::success("Message sent successfully"));
    Ok((jar, Redirect::to("/messages")))
}
