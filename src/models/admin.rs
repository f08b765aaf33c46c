// src/models/admin.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'admins' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admin {
    pub id: i64,

    /// Unique login name.
    pub username: String,

    /// Stored as entered; compared verbatim on login.
    #[serde(skip)]
    pub password: String,

    #[serde(serialize_with = "crate::models::sqlite_datetime::serialize")]
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// DTO for admin login.
/// Not length-checked: any mismatch, however malformed, is a failed login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
