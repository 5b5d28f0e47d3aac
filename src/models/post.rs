use serde::Deserialize;
use sqlx::FromRow;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,

    /// Set once when the post is created, never updated.
    pub date_posted: chrono::DateTime<chrono::Utc>,

    pub user_id: i64,
}

/// Form payload for publishing a post.
#[derive(Debug, Deserialize)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
}
