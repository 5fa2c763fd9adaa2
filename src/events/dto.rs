use serde::Serialize;
use time::OffsetDateTime;

/// Fields collected for event creation. Updates reuse the same shape — the
/// stored procedure overwrites every column, there is no partial update.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub event_date: OffsetDateTime,
    pub registration_deadline: OffsetDateTime,
    pub capacity: i32,
}
