pub mod login;
pub mod register;
pub mod session;
pub mod users;

// Internal "interpreter" for `Action`; the match lives in `run` so this
// module only lists the actions.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    Users(users::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
