// src/models/user.rs

use serde::Deserialize;
use sqlx::FromRow;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address, used as the login identifier.
    pub email: String,

    /// Argon2 password hash.
    pub password: String,
}

/// Form payload for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Form payload for login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
