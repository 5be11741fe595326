//! Page navigation and the session guard for protected pages. The guard is a
//! UX redirect only; access control is the API's job.

use crate::{error::AppError, session::Session, session::SessionStore};
use std::fmt;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Users,
}

impl Page {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Users => "/users",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Returns the stored session, or the page to redirect to when there is none.
///
/// # Errors
/// Returns `Page::Login` when no valid session is stored.
pub fn require_session(store: &SessionStore) -> Result<Session, Page> {
    store.get_session().ok_or(Page::Login)
}

/// Clears the stored session and returns the login page.
///
/// # Errors
/// Returns an error if the cookie jar cannot be written.
pub fn logout(store: &SessionStore) -> Result<Page, AppError> {
    store.clear_session()?;
    info!("signed out");
    Ok(Page::Login)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn guard_redirects_to_login_without_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        assert_eq!(require_session(&store).unwrap_err(), Page::Login);
    }

    #[test]
    fn logout_clears_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let session: Session = serde_json::from_value(json!({
            "token": "t",
            "user": {"id": "1", "name": "A", "email": "a@x.com", "role": "admin"}
        }))
        .unwrap();
        store.set_session(&session).unwrap();
        assert!(require_session(&store).is_ok());

        assert_eq!(logout(&store).unwrap(), Page::Login);
        assert!(require_session(&store).is_err());
    }
}
