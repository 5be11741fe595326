//! Capability checks used to enable or disable controls. These are display
//! rules only; the API must enforce the same capabilities.

use crate::session::Session;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateUser,
    EditUser,
    DeleteUser,
}

impl Capability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::EditUser => "edit_user",
            Self::DeleteUser => "delete_user",
        }
    }

    /// Human wording used in "You do not have permission to ..." messages.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::CreateUser => "create users",
            Self::EditUser => "edit users",
            Self::DeleteUser => "delete users",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[must_use]
pub fn can_perform(session: Option<&Session>, capability: Capability) -> bool {
    session.is_some_and(|session| session.has_permission(capability.as_str()))
}
