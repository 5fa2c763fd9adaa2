use sqlx::PgPool;
use uuid::Uuid;

use crate::events::dto::EventDraft;
use crate::events::repo_types::{EventSummary, RegistrationWindow};

/// Every event is filed under this category; the surface never asks for one.
pub const DEFAULT_CATEGORY: &str = "conference";

/// Event mutation goes through the store's procedures, one round-trip each.
pub async fn create_event(
    db: &PgPool,
    draft: &EventDraft,
    created_by: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("CALL create_event($1, $2, $3, $4, $5, $6, $7, $8)")
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.event_date)
        .bind(draft.registration_deadline)
        .bind(&draft.location)
        .bind(draft.capacity)
        .bind(DEFAULT_CATEGORY)
        .bind(created_by)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_event(
    db: &PgPool,
    event_id: i32,
    draft: &EventDraft,
) -> Result<(), sqlx::Error> {
    sqlx::query("CALL update_event($1, $2, $3, $4, $5, $6, $7, $8)")
        .bind(event_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.event_date)
        .bind(draft.registration_deadline)
        .bind(&draft.location)
        .bind(draft.capacity)
        .bind(DEFAULT_CATEGORY)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete_event(db: &PgPool, event_id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("CALL delete_event($1)")
        .bind(event_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn list_public(db: &PgPool) -> Result<Vec<EventSummary>, sqlx::Error> {
    sqlx::query_as::<_, EventSummary>(
        r#"
        SELECT event_id, event_name, event_date, location
        FROM public_events
        ORDER BY event_date
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn registration_window(
    db: &PgPool,
    event_id: i32,
) -> Result<Option<RegistrationWindow>, sqlx::Error> {
    sqlx::query_as::<_, RegistrationWindow>(
        r#"
        SELECT capacity, registration_deadline
        FROM events
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(db)
    .await
}

pub async fn attendee_count(db: &PgPool, event_id: i32) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(db)
        .await
}

pub async fn is_registered(
    db: &PgPool,
    event_id: i32,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM attendees WHERE event_id = $1 AND user_id = $2)",
    )
    .bind(event_id)
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn insert_attendee(db: &PgPool, event_id: i32, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO attendees (event_id, user_id) VALUES ($1, $2)")
        .bind(event_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}
