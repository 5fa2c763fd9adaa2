use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row from the `public_events` view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    pub event_id: i32,
    pub event_name: String,
    pub event_date: OffsetDateTime,
    pub location: String,
}

/// Capacity and deadline slice of an event, used by the registration guards.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWindow {
    pub capacity: i32,
    pub registration_deadline: OffsetDateTime,
}
