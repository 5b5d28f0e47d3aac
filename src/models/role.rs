use sqlx::FromRow;

/// Represents the 'roles' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: i64,

    /// Unique role name, e.g. 'user' or 'admin'.
    pub name: String,
}

/// Join record linking a user to a role.
#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    pub id: i64,
    pub user_id: i64,
    pub role_id: i64,
}
