use thiserror::Error;

/// Application error taxonomy.
///
/// `Validation` and `Conflict` are recoverable: the session reports them and
/// re-prompts. `Store` aborts the current operation and returns the user to
/// the menu. Invalid credentials are not an error at all — `auth::services::login`
/// returns `Ok(None)` so callers can tell a bad password from a broken store.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed a format or length rule.
    #[error("{0}")]
    Validation(String),
    /// A uniqueness rule would be violated (username, email, registration).
    #[error("{0}")]
    Conflict(String),
    /// No event with this ID.
    #[error("event {0} not found")]
    EventNotFound(i32),
    /// The registration deadline has already passed.
    #[error("registration deadline for event {0} has passed")]
    DeadlinePassed(i32),
    /// The event is at capacity.
    #[error("event {0} is full")]
    EventFull(i32),
    /// Query or connectivity failure.
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }
}
