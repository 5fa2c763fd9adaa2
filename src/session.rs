use tracing::info;

use crate::auth::dto::Identity;
use crate::auth::repo_types::Role;
use crate::console::Console;
use crate::state::AppState;
use crate::{auth, events};

/// Top-level menu shown while unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Login,
    Register,
    Exit,
}

impl MainChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MainChoice::Login),
            "2" => Some(MainChoice::Register),
            "3" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresidentChoice {
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    ViewEvents,
    Logout,
}

impl PresidentChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(PresidentChoice::CreateEvent),
            "2" => Some(PresidentChoice::UpdateEvent),
            "3" => Some(PresidentChoice::DeleteEvent),
            "4" => Some(PresidentChoice::ViewEvents),
            "5" => Some(PresidentChoice::Logout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberChoice {
    ViewEvents,
    RegisterForEvent,
    Logout,
}

impl MemberChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MemberChoice::ViewEvents),
            "2" => Some(MemberChoice::RegisterForEvent),
            "3" => Some(MemberChoice::Logout),
            _ => None,
        }
    }
}

/// Session state machine. One interactive session at a time; the process
/// only exits from the unauthenticated state.
#[derive(Debug, Clone, Copy)]
pub enum Session {
    Unauthenticated,
    President(Identity),
    Member(Identity),
}

impl Session {
    /// A successful login lands in the menu matching the stored role.
    pub fn after_login(identity: Identity) -> Session {
        match identity.role {
            Role::President => Session::President(identity),
            Role::Regular => Session::Member(identity),
        }
    }
}

/// Drive the interactive session until the user exits or input ends.
///
/// Store failures inside an operation are reported and drop the user back
/// to the current menu; only console I/O errors unwind this loop.
pub async fn run(state: &AppState, console: &mut dyn Console) -> anyhow::Result<()> {
    let mut session = Session::Unauthenticated;
    loop {
        session = match session {
            Session::Unauthenticated => {
                console.say("\n=== EMAT Event Management ===");
                console.say("1. Login");
                console.say("2. Register");
                console.say("3. Exit");
                let raw = console.read_line("Choice: ")?;
                match MainChoice::parse(&raw) {
                    Some(MainChoice::Login) => match auth::handlers::login(state, console).await? {
                        Some(identity) => Session::after_login(identity),
                        None => Session::Unauthenticated,
                    },
                    Some(MainChoice::Register) => {
                        auth::handlers::register(state, console).await?;
                        Session::Unauthenticated
                    }
                    Some(MainChoice::Exit) => {
                        console.say("Goodbye!");
                        return Ok(());
                    }
                    None => {
                        console.say("Invalid choice!");
                        Session::Unauthenticated
                    }
                }
            }
            Session::President(identity) => {
                console.say("\n=== President Menu ===");
                console.say("1. Create Event");
                console.say("2. Update Event");
                console.say("3. Delete Event");
                console.say("4. View Events");
                console.say("5. Logout");
                let raw = console.read_line("Choice: ")?;
                match PresidentChoice::parse(&raw) {
                    Some(PresidentChoice::CreateEvent) => {
                        events::handlers::create_event(state, console, &identity).await?;
                        Session::President(identity)
                    }
                    Some(PresidentChoice::UpdateEvent) => {
                        events::handlers::update_event(state, console).await?;
                        Session::President(identity)
                    }
                    Some(PresidentChoice::DeleteEvent) => {
                        events::handlers::delete_event(state, console).await?;
                        Session::President(identity)
                    }
                    Some(PresidentChoice::ViewEvents) => {
                        events::handlers::view_events(state, console).await?;
                        Session::President(identity)
                    }
                    Some(PresidentChoice::Logout) => {
                        info!(user_id = %identity.user_id, "president logged out");
                        Session::Unauthenticated
                    }
                    None => {
                        console.say("Invalid choice!");
                        Session::President(identity)
                    }
                }
            }
            Session::Member(identity) => {
                console.say("\n=== User Menu ===");
                console.say("1. View Events");
                console.say("2. Register for Event");
                console.say("3. Logout");
                let raw = console.read_line("Choice: ")?;
                match MemberChoice::parse(&raw) {
                    Some(MemberChoice::ViewEvents) => {
                        events::handlers::view_events(state, console).await?;
                        Session::Member(identity)
                    }
                    Some(MemberChoice::RegisterForEvent) => {
                        events::handlers::register_for_event(state, console, &identity).await?;
                        Session::Member(identity)
                    }
                    Some(MemberChoice::Logout) => {
                        info!(user_id = %identity.user_id, "user logged out");
                        Session::Unauthenticated
                    }
                    None => {
                        console.say("Invalid choice!");
                        Session::Member(identity)
                    }
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use uuid::Uuid;

    #[test]
    fn main_menu_parses_numbered_choices() {
        assert_eq!(MainChoice::parse("1"), Some(MainChoice::Login));
        assert_eq!(MainChoice::parse(" 2 "), Some(MainChoice::Register));
        assert_eq!(MainChoice::parse("3"), Some(MainChoice::Exit));
        assert_eq!(MainChoice::parse("4"), None);
        assert_eq!(MainChoice::parse("login"), None);
        assert_eq!(MainChoice::parse(""), None);
    }

    #[test]
    fn president_menu_parses_all_five_choices() {
        assert_eq!(PresidentChoice::parse("1"), Some(PresidentChoice::CreateEvent));
        assert_eq!(PresidentChoice::parse("2"), Some(PresidentChoice::UpdateEvent));
        assert_eq!(PresidentChoice::parse("3"), Some(PresidentChoice::DeleteEvent));
        assert_eq!(PresidentChoice::parse("4"), Some(PresidentChoice::ViewEvents));
        assert_eq!(PresidentChoice::parse("5"), Some(PresidentChoice::Logout));
        assert_eq!(PresidentChoice::parse("6"), None);
    }

    #[test]
    fn member_menu_parses_all_three_choices() {
        assert_eq!(MemberChoice::parse("1"), Some(MemberChoice::ViewEvents));
        assert_eq!(MemberChoice::parse("2"), Some(MemberChoice::RegisterForEvent));
        assert_eq!(MemberChoice::parse("3"), Some(MemberChoice::Logout));
        assert_eq!(MemberChoice::parse("0"), None);
    }

    #[test]
    fn login_lands_in_the_menu_matching_the_role() {
        let president = Identity {
            user_id: Uuid::new_v4(),
            role: Role::President,
        };
        let member = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Regular,
        };
        assert!(matches!(
            Session::after_login(president),
            Session::President(_)
        ));
        assert!(matches!(Session::after_login(member), Session::Member(_)));
    }

    #[tokio::test]
    async fn invalid_choice_reprompts_and_exit_terminates() {
        let state = AppState::fake();
        let mut console = ScriptedConsole::new(["9", "3"]);
        run(&state, &mut console).await.expect("session exits cleanly");
        assert!(console.printed("Invalid choice!"));
        assert!(console.printed("Goodbye!"));
    }

    #[tokio::test]
    async fn short_registration_inputs_reprompt_without_store_access() {
        let state = AppState::fake();
        // "2" opens registration; "ab" fails the length rule and re-prompts;
        // the script then ends, so the flow unwinds before the uniqueness
        // probe could touch the pool.
        let mut console = ScriptedConsole::new(["2", "ab"]);
        let result = run(&state, &mut console).await;
        assert!(result.is_err());
        assert!(console.printed("Username must be at least 3 characters long!"));
        assert!(!console.printed("Error during registration"));
    }
}
