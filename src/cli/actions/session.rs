use crate::{
    auth,
    cli::globals::GlobalArgs,
    error::AppError,
    ui::{render, Profile},
};
use anyhow::Result;

/// # Errors
/// Returns an error if the cookie jar cannot be written.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let page = auth::logout(&globals.store())?;
    render::print_success(&format!("Signed out. Next: useradmin {}", page.path().trim_start_matches('/')));
    Ok(())
}

/// # Errors
/// Returns `NotAuthenticated` when no session is stored.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    let session = auth::require_session(&globals.store()).map_err(|_| AppError::NotAuthenticated)?;
    print!("{}", render::profile(&Profile::from_session(Some(&session))));
    Ok(())
}
