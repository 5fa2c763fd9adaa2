use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::dto::{Identity, RegisterRequest};
use crate::auth::repo_types::User;
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    username.chars().count() >= 3
}

pub(crate) fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// SHA-256 over the raw password bytes, lowercase hex. Unsalted and
/// unstretched to stay interoperable with rows hashed by the legacy system;
/// every stored hash is exactly 64 characters.
pub fn hash_password(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

/// Validate and insert a new account.
///
/// All format rules are checked before the store is touched, then username
/// and email uniqueness, then a single INSERT — there is no partial write to
/// roll back.
pub async fn register(db: &PgPool, req: RegisterRequest) -> Result<User, AppError> {
    if !is_valid_username(&req.username) {
        return Err(AppError::validation(
            "Username must be at least 3 characters long!",
        ));
    }
    if !is_valid_password(&req.password) {
        return Err(AppError::validation(
            "Password must be at least 8 characters long!",
        ));
    }
    if !is_valid_email(&req.email) {
        return Err(AppError::validation("Please enter a valid email address!"));
    }

    if User::find_by_username(db, &req.username).await?.is_some() {
        warn!(username = %req.username, "username already exists");
        return Err(AppError::conflict("Username already exists!"));
    }
    if User::find_by_email(db, &req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(AppError::conflict("Email already registered!"));
    }

    let hash = hash_password(&req.password);
    let user = User::create(db, &req, &hash).await?;
    info!(user_id = %user.user_id, username = %user.username, "user registered");
    Ok(user)
}

/// Authenticate a login attempt.
///
/// `Ok(None)` means the credentials did not match an active account; the
/// caller reports that generically, without saying which part was wrong.
/// `Err` is reserved for store failures.
pub async fn login(
    db: &PgPool,
    username: &str,
    password: &str,
) -> Result<Option<Identity>, AppError> {
    let hash = hash_password(password);
    let identity = match User::verify_credentials(db, username, &hash).await? {
        Some(identity) => identity,
        None => {
            warn!(username = %username, "login rejected");
            return Ok(None);
        }
    };
    User::touch_last_login(db, identity.user_id).await?;
    info!(user_id = %identity.user_id, role = ?identity.role, "user logged in");
    Ok(Some(identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn hash_is_deterministic_lowercase_hex() {
        let hash = hash_password("password123");
        assert_eq!(
            hash,
            "ef92b778bafe771e89245b89ecbc08a44a4e166c06659911881f383d4473e94f"
        );
        assert_eq!(hash, hash_password("password123"));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn hash_differs_for_nearby_inputs() {
        assert_ne!(hash_password("password123"), hash_password("password124"));
    }

    #[test]
    fn username_requires_three_characters() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("ab"));
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("alice123"));
    }

    #[test]
    fn password_requires_eight_characters() {
        assert!(!is_valid_password("1234567"));
        assert!(is_valid_password("12345678"));
        assert!(is_valid_password("longpassword"));
    }

    #[test]
    fn email_pattern_matches_local_at_domain_tld() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice@example.c"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@.com"));
        assert!(!is_valid_email("alice example@x.com"));
    }

    fn request(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            full_name: "Alice Example".into(),
            department: None,
        }
    }

    // The fake state never connects, so these prove rejection happens before
    // any store access.
    #[tokio::test]
    async fn short_username_is_rejected_without_store_write() {
        let state = AppState::fake();
        let err = register(&state.db, request("ab", "longpassword", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected_without_store_write() {
        let state = AppState::fake();
        let err = register(&state.db, request("alice123", "short", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_without_store_write() {
        let state = AppState::fake();
        let err = register(&state.db, request("alice123", "longpassword", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
