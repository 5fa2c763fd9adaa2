use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::repo_types::Role;

/// Data collected by the registration flow.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub department: Option<String>,
}

/// The authenticated identity a session carries. This is the only
/// per-session state held in memory; everything else lives in the store.
#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}
