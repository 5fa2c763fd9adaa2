use std::io;

use time::OffsetDateTime;
use tracing::{error, info};

use crate::auth::dto::Identity;
use crate::console::Console;
use crate::error::AppError;
use crate::events::dto::EventDraft;
use crate::events::{repo, services};
use crate::state::AppState;

fn prompt_datetime(console: &mut dyn Console, label: &str) -> io::Result<OffsetDateTime> {
    loop {
        let input = console.read_line(label)?;
        match services::parse_event_datetime(&input) {
            Ok(ts) => return Ok(ts),
            Err(e) => console.say(&e.to_string()),
        }
    }
}

fn prompt_i32(console: &mut dyn Console, label: &str) -> io::Result<i32> {
    loop {
        let input = console.read_line(label)?;
        match input.trim().parse::<i32>() {
            Ok(n) => return Ok(n),
            Err(_) => console.say("Please enter a whole number!"),
        }
    }
}

/// Create a new event, attributed to the acting president.
pub async fn create_event(
    state: &AppState,
    console: &mut dyn Console,
    president: &Identity,
) -> anyhow::Result<()> {
    console.say("\n=== Create New Event ===");
    let name = console.read_line("Event Name: ")?;
    let description = console.read_line("Description: ")?;
    let location = console.read_line("Location: ")?;
    let event_date = prompt_datetime(console, "Event Date (YYYY-MM-DD HH:MM:SS): ")?;
    let registration_deadline =
        prompt_datetime(console, "Registration Deadline (YYYY-MM-DD HH:MM:SS): ")?;
    let capacity = prompt_i32(console, "Capacity: ")?;

    let draft = EventDraft {
        name,
        description,
        location,
        event_date,
        registration_deadline,
        capacity,
    };
    match repo::create_event(&state.db, &draft, president.user_id).await {
        Ok(()) => {
            info!(created_by = %president.user_id, name = %draft.name, "event created");
            console.say("Event created successfully!");
        }
        Err(e) => {
            error!(error = %e, "create event failed");
            console.say(&format!("Error creating event: {}", e));
        }
    }
    Ok(())
}

/// Overwrite every field of an existing event.
pub async fn update_event(state: &AppState, console: &mut dyn Console) -> anyhow::Result<()> {
    let event_id = prompt_i32(console, "Enter event ID to update: ")?;
    let name = console.read_line("New event name: ")?;
    let description = console.read_line("New description: ")?;
    let location = console.read_line("New location: ")?;
    let event_date = prompt_datetime(console, "New event date (YYYY-MM-DD HH:MM:SS): ")?;
    let registration_deadline =
        prompt_datetime(console, "New registration deadline (YYYY-MM-DD HH:MM:SS): ")?;
    let capacity = prompt_i32(console, "New capacity: ")?;

    let draft = EventDraft {
        name,
        description,
        location,
        event_date,
        registration_deadline,
        capacity,
    };
    match repo::update_event(&state.db, event_id, &draft).await {
        Ok(()) => {
            info!(event_id, "event updated");
            console.say("Event updated successfully!");
        }
        Err(e) => {
            error!(error = %e, event_id, "update event failed");
            console.say(&format!("Error updating event: {}", e));
        }
    }
    Ok(())
}

pub async fn delete_event(state: &AppState, console: &mut dyn Console) -> anyhow::Result<()> {
    let event_id = prompt_i32(console, "Enter event ID to delete: ")?;
    match repo::delete_event(&state.db, event_id).await {
        Ok(()) => {
            info!(event_id, "event deleted");
            console.say("Event deleted successfully!");
        }
        Err(e) => {
            error!(error = %e, event_id, "delete event failed");
            console.say(&format!("Error deleting event: {}", e));
        }
    }
    Ok(())
}

/// Print every row of the public events view.
pub async fn view_events(state: &AppState, console: &mut dyn Console) -> anyhow::Result<()> {
    match repo::list_public(&state.db).await {
        Ok(events) => {
            console.say("\n=== Available Events ===");
            for event in events {
                console.say(&format!("ID: {}", event.event_id));
                console.say(&format!("Name: {}", event.event_name));
                console.say(&format!(
                    "Date: {}",
                    services::format_event_datetime(event.event_date)
                ));
                console.say(&format!("Location: {}", event.location));
                console.say("------------------");
            }
        }
        Err(e) => {
            error!(error = %e, "list events failed");
            console.say(&format!("Error viewing events: {}", e));
        }
    }
    Ok(())
}

pub async fn register_for_event(
    state: &AppState,
    console: &mut dyn Console,
    user: &Identity,
) -> anyhow::Result<()> {
    let event_id = prompt_i32(console, "Enter event ID to register: ")?;
    match services::register_attendance(&state.db, user.user_id, event_id).await {
        Ok(()) => console.say("Successfully registered for the event!"),
        Err(AppError::EventNotFound(id)) => console.say(&format!("No event with ID {}!", id)),
        Err(AppError::DeadlinePassed(_)) => console.say("Registration deadline has passed!"),
        Err(AppError::EventFull(_)) => console.say("Event is full!"),
        Err(AppError::Conflict(msg)) | Err(AppError::Validation(msg)) => console.say(&msg),
        Err(AppError::Store(e)) => {
            error!(error = %e, event_id, "register for event failed");
            console.say(&format!("Error registering for event: {}", e));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::Role;
    use crate::console::ScriptedConsole;
    use crate::state::AppState;
    use uuid::Uuid;

    #[test]
    fn prompt_i32_reprompts_until_numeric() {
        let mut console = ScriptedConsole::new(["not a number", " 42 "]);
        let n = prompt_i32(&mut console, "Capacity: ").expect("eventually numeric");
        assert_eq!(n, 42);
        assert!(console.printed("Please enter a whole number!"));
    }

    #[tokio::test]
    async fn malformed_event_date_is_reported_and_never_reaches_the_store() {
        let state = AppState::fake();
        let president = Identity {
            user_id: Uuid::new_v4(),
            role: Role::President,
        };
        // The script ends right after the bad date, so the re-prompt hits EOF
        // and the flow unwinds before any query could run.
        let mut console =
            ScriptedConsole::new(["Spring Gala", "Annual fundraiser", "Main Hall", "2024/01/01"]);
        let result = create_event(&state, &mut console, &president).await;
        assert!(result.is_err());
        assert!(console.printed("Invalid date format"));
        assert!(!console.printed("Error creating event"));
    }
}
