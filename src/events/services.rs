use sqlx::PgPool;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::events::repo;

/// Interactive datetime format. Inputs carry no zone and are taken as UTC.
const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn parse_event_datetime(input: &str) -> Result<OffsetDateTime, AppError> {
    PrimitiveDateTime::parse(input.trim(), DATETIME_FORMAT)
        .map(|dt| dt.assume_utc())
        .map_err(|_| {
            AppError::validation("Invalid date format. Please use YYYY-MM-DD HH:MM:SS format")
        })
}

pub fn format_event_datetime(ts: OffsetDateTime) -> String {
    ts.format(DATETIME_FORMAT).unwrap_or_else(|_| ts.to_string())
}

/// Register a user for an event.
///
/// Guards run as sequential reads before the single INSERT: the event must
/// exist, the deadline must not have passed, the headcount must be below
/// capacity, and the user must not already hold a registration. The
/// composite primary key on attendees backstops the duplicate check.
pub async fn register_attendance(
    db: &PgPool,
    user_id: Uuid,
    event_id: i32,
) -> Result<(), AppError> {
    let window = repo::registration_window(db, event_id)
        .await?
        .ok_or(AppError::EventNotFound(event_id))?;

    if OffsetDateTime::now_utc() > window.registration_deadline {
        return Err(AppError::DeadlinePassed(event_id));
    }
    if repo::is_registered(db, event_id, user_id).await? {
        return Err(AppError::conflict(
            "You are already registered for this event!",
        ));
    }
    if repo::attendee_count(db, event_id).await? >= i64::from(window.capacity) {
        return Err(AppError::EventFull(event_id));
    }

    repo::insert_attendee(db, event_id, user_id).await?;
    info!(user_id = %user_id, event_id, "attendee registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_the_interactive_datetime_format() {
        let ts = parse_event_datetime("2024-01-01 10:30:00").expect("valid datetime");
        assert_eq!(ts, datetime!(2024-01-01 10:30:00 UTC));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let ts = parse_event_datetime("  2024-06-15 09:00:00 ").expect("valid datetime");
        assert_eq!(ts, datetime!(2024-06-15 09:00:00 UTC));
    }

    #[test]
    fn rejects_slash_separated_dates() {
        let err = parse_event_datetime("2024/01/01").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("YYYY-MM-DD HH:MM:SS"));
    }

    #[test]
    fn rejects_date_without_time() {
        assert!(parse_event_datetime("2024-01-01").is_err());
        assert!(parse_event_datetime("").is_err());
    }

    #[test]
    fn formats_back_to_the_same_shape() {
        let ts = datetime!(2025-03-02 18:05:00 UTC);
        assert_eq!(format_event_datetime(ts), "2025-03-02 18:05:00");
    }
}
