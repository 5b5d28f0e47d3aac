// src/handlers/posts.rs

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::post::{NewPostForm, Post},
    utils::{
        flash::{self, Flash},
        session::CurrentUser,
    },
    views,
};

/// Public post feed, newest first.
pub async fn feed(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, notice) = flash::take(jar);

    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, date_posted, user_id
         FROM posts
         ORDER BY date_posted DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok((jar, Html(views::home(&posts, notice.as_ref()))))
}

pub async fn new_post_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, notice) = flash::take(jar);
    (jar, Html(views::new_post(notice.as_ref())))
}

/// Publishes a new post by the current user. The publication date is
/// assigned by the server at creation.
pub async fn create_post(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    Form(payload): Form<NewPostForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    sqlx::query("INSERT INTO posts (title, content, date_posted, user_id) VALUES (?, ?, ?, ?)")
        .bind(&payload.title)
        .bind(&payload.content)
        .bind(chrono::Utc::now())
        .bind(user.id())
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            AppError::from(e)
        })?;

    let jar = flash::set(jar, Flash::success("Your post has been published"));
    Ok((jar, Redirect::to("/posts")))
}
