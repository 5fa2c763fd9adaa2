use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::dto::{Identity, RegisterRequest};
use crate::auth::repo_types::User;

impl User {
    /// Find a user by exact (case-sensitive) username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password_hash, email, full_name,
                   department, role, is_active, last_login
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password_hash, email, full_name,
                   department, role, is_active, last_login
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. The role is set to 'regular' explicitly rather than
    /// leaning on the column default.
    pub async fn create(
        db: &PgPool,
        req: &RegisterRequest,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, username, password_hash, email, full_name, department, role)
            VALUES ($1, $2, $3, $4, $5, $6, 'regular')
            RETURNING user_id, username, password_hash, email, full_name,
                      department, role, is_active, last_login
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.username)
        .bind(password_hash)
        .bind(&req.email)
        .bind(&req.full_name)
        .bind(req.department.as_deref())
        .fetch_one(db)
        .await
    }

    /// Look up an active user matching username and password hash.
    pub async fn verify_credentials(
        db: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<Identity>, sqlx::Error> {
        sqlx::query_as::<_, Identity>(
            r#"
            SELECT user_id, role
            FROM users
            WHERE username = $1 AND password_hash = $2 AND is_active = TRUE
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(db)
        .await
    }

    pub async fn touch_last_login(db: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = now() WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
