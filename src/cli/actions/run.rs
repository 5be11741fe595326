use crate::cli::actions::{login, register, session, users, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Register(args) => register::execute(args).await,
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals),
        Action::Users(args) => users::execute(args).await,
    }
}
