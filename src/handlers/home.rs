// src/handlers/home.rs

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::post::Post,
    utils::{flash, session},
    views,
};

/// Landing page.
///
/// Authenticated visitors land on the chat view; anonymous visitors see
/// the public post feed, newest first.
pub async fn index(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, notice) = flash::take(jar);

    let page = match session::resolve(&jar, &config.session_secret) {
        Some(user) => views::main_chat(&user, notice.as_ref()),
        None => {
            let posts = sqlx::query_as::<_, Post>(
                "SELECT id, title, content, date_posted, user_id
                 FROM posts
                 ORDER BY date_posted DESC",
            )
            .fetch_all(&pool)
            .await?;

            views::home(&posts, notice.as_ref())
        }
    };

    Ok((jar, Html(page)))
}
