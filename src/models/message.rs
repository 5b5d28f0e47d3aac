use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'messages' table in the database.
///
/// Sender and recipient are nullable foreign keys: deleting a user is not
/// handled anywhere, so orphaned references remain representable.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub body: Option<String>,

    /// Set once when the message is created, indexed for ordering.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// A message joined with both participants' usernames, for display.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithUsers {
    pub id: i64,
    pub sender_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub body: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub sender_username: Option<String>,
    pub recipient_username: Option<String>,
}

/// Form payload for sending a message. The recipient field carries the
/// recipient's email address.
#[derive(Debug, Deserialize, Validate)]
pub struct NewMessageForm {
    pub recipient: String,

    #[validate(length(max = 140, message = "Message must be at most 140 characters"))]
    pub body: String,
}
