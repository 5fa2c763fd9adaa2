use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account role. Presidents manage events; everyone else browses and
/// registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    President,
    Regular,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,                      // app-generated v4
    pub username: String,                   // unique, case-sensitive
    #[serde(skip_serializing)]
    pub password_hash: String,              // lowercase-hex SHA-256, not exposed
    pub email: String,                      // unique
    pub full_name: String,
    pub department: Option<String>,         // NULL when skipped at registration
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<OffsetDateTime>, // touched on successful login
}
