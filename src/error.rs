//! Error taxonomy shared by the session store, API client and view models.
//! Every variant renders to a message that is safe to show to the operator;
//! none of them carry tokens or passwords.

use crate::api::FailureKind;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Client-side input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// A failed login is still cooling down; carries the remaining seconds.
    #[error("Please wait {0} seconds before trying again.")]
    Cooldown(u64),

    /// The current session lacks the capability for this action.
    #[error("You do not have permission to {0}.")]
    Forbidden(String),

    /// A protected action was attempted without a stored session.
    #[error("You are not signed in. Please log in first.")]
    NotAuthenticated,

    /// Non-2xx answer from the API.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("{message}")]
    Transport { kind: FailureKind, message: String },

    #[error("Response error: {0}")]
    Parse(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_includes_status_and_message() {
        let err = AppError::Http {
            status: 409,
            message: "email already taken".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (409): email already taken");
    }

    #[test]
    fn forbidden_names_the_action() {
        let err = AppError::Forbidden("delete users".to_string());
        assert_eq!(err.to_string(), "You do not have permission to delete users.");
    }

    #[test]
    fn io_errors_map_to_storage() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(matches!(err, AppError::Storage(message) if message == "disk full"));
    }
}
