use tracing::error;

use crate::auth::dto::{Identity, RegisterRequest};
use crate::auth::repo_types::User;
use crate::auth::services;
use crate::console::Console;
use crate::state::AppState;

/// Interactive registration. Each field is re-prompted until it passes its
/// rule; a store failure during a uniqueness probe aborts the whole flow
/// with a message (no partial insert is possible — the write is one INSERT
/// at the end). There is no auto-login afterwards.
pub async fn register(state: &AppState, console: &mut dyn Console) -> anyhow::Result<()> {
    console.say("\n=== User Registration ===");

    let username = loop {
        let input = console
            .read_line("Enter username (minimum 3 characters): ")?
            .trim()
            .to_string();
        if !services::is_valid_username(&input) {
            console.say("Username must be at least 3 characters long!");
            continue;
        }
        match User::find_by_username(&state.db, &input).await {
            Ok(Some(_)) => console.say("Username already exists!"),
            Ok(None) => break input,
            Err(e) => {
                error!(error = %e, "username lookup failed");
                console.say(&format!("Error during registration: {}", e));
                return Ok(());
            }
        }
    };

    let password = loop {
        let input = console.read_line("Enter password (minimum 8 characters): ")?;
        if services::is_valid_password(&input) {
            break input;
        }
        console.say("Password must be at least 8 characters long!");
    };

    let email = loop {
        let input = console.read_line("Enter email: ")?.trim().to_string();
        if !services::is_valid_email(&input) {
            console.say("Please enter a valid email address!");
            continue;
        }
        match User::find_by_email(&state.db, &input).await {
            Ok(Some(_)) => console.say("Email already registered!"),
            Ok(None) => break input,
            Err(e) => {
                error!(error = %e, "email lookup failed");
                console.say(&format!("Error during registration: {}", e));
                return Ok(());
            }
        }
    };

    let full_name = console.read_line("Enter full name: ")?.trim().to_string();
    let department = console
        .read_line("Enter department (press Enter to skip): ")?
        .trim()
        .to_string();
    let department = if department.is_empty() {
        None
    } else {
        Some(department)
    };

    let req = RegisterRequest {
        username,
        password,
        email,
        full_name,
        department,
    };
    match services::register(&state.db, req).await {
        Ok(_) => console.say("Registration successful! Please login."),
        Err(e) => {
            error!(error = %e, "registration failed");
            console.say(&format!("Error during registration: {}", e));
        }
    }
    Ok(())
}

/// Interactive login. Returns the identity on success; bad credentials and
/// store failures both leave the caller unauthenticated, but are reported
/// differently.
pub async fn login(
    state: &AppState,
    console: &mut dyn Console,
) -> anyhow::Result<Option<Identity>> {
    let username = console.read_line("Username: ")?.trim().to_string();
    let password = console.read_line("Password: ")?;

    match services::login(&state.db, &username, &password).await {
        Ok(Some(identity)) => Ok(Some(identity)),
        Ok(None) => {
            console.say("Invalid credentials!");
            Ok(None)
        }
        Err(e) => {
            error!(error = %e, "login failed");
            console.say(&format!("Error during login: {}", e));
            Ok(None)
        }
    }
}
