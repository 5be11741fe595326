//! Response-shaped results. Server answers and synthesized transport failures
//! share one type so callers always check `ok()` and read `json()` the same
//! way, and a failed connection never surfaces as an error of its own.

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::{error::Error as _, fmt, io};

/// Status reported by synthesized responses, as for a fetch that never got an answer.
pub const SYNTHETIC_STATUS: u16 = 0;

/// Maximum number of body characters surfaced in messages.
const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    ConnectionRefused,
    NetworkError,
    Timeout,
    UnknownError,
    /// The call needs a bearer token and no session is stored; nothing was sent.
    NotAuthenticated,
}

impl FailureKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConnectionRefused => "CONNECTION_REFUSED",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
        }
    }

    #[must_use]
    pub const fn friendly_message(self) -> &'static str {
        match self {
            Self::ConnectionRefused => {
                "Unable to connect to the server. Please check that it is running and try again."
            }
            Self::NetworkError => {
                "A network error occurred. Please check your connection and try again."
            }
            Self::Timeout => "The server took too long to respond. Please try again.",
            Self::UnknownError => "An unexpected error occurred. Please try again.",
            Self::NotAuthenticated => "You are not signed in. Please log in first.",
        }
    }

    /// Maps a reqwest failure onto the transport taxonomy.
    #[must_use]
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }

        let mut source = err.source();
        while let Some(cause) = source {
            if let Some(io_err) = cause.downcast_ref::<io::Error>() {
                match io_err.kind() {
                    io::ErrorKind::ConnectionRefused => return Self::ConnectionRefused,
                    io::ErrorKind::TimedOut => return Self::Timeout,
                    _ => {}
                }
            }
            source = cause.source();
        }

        if err.is_connect() || err.is_request() || err.is_body() {
            Self::NetworkError
        } else {
            Self::UnknownError
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: u16,
    body: String,
    failure: Option<FailureKind>,
}

impl ApiResponse {
    /// Wraps a real HTTP answer.
    #[must_use]
    pub fn from_parts(status: u16, body: String) -> Self {
        Self {
            status,
            body,
            failure: None,
        }
    }

    /// Builds a failed response for a call that never got an answer. The body
    /// carries `message` and `error` like a server error would.
    #[must_use]
    pub fn synthesized(kind: FailureKind) -> Self {
        let body = json!({
            "message": kind.friendly_message(),
            "error": kind.code(),
        });
        Self {
            status: SYNTHETIC_STATUS,
            body: body.to_string(),
            failure: Some(kind),
        }
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        self.failure.is_none() && (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body.
    ///
    /// # Errors
    /// Returns `AppError::Parse` when the body is not the expected JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_str(&self.body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Server-provided `message` (or `error`) field, else a trimmed plain-text
    /// body, else `default`.
    #[must_use]
    pub fn message(&self, default: &str) -> String {
        if let Ok(value) = serde_json::from_str::<Value>(&self.body) {
            let field = ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str))
                .map(str::trim)
                .filter(|text| !text.is_empty());
            return field.map_or_else(|| default.to_string(), truncate);
        }

        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            default.to_string()
        } else {
            truncate(trimmed)
        }
    }

    /// Converts a non-ok response into the matching `AppError`.
    ///
    /// # Errors
    /// Returns the error described by this response when `ok()` is false.
    pub fn into_result(self, default: &str) -> Result<Self, AppError> {
        if self.ok() {
            return Ok(self);
        }
        Err(self.to_error(default))
    }

    #[must_use]
    pub fn to_error(&self, default: &str) -> AppError {
        match self.failure {
            Some(FailureKind::NotAuthenticated) => AppError::NotAuthenticated,
            Some(kind) => AppError::Transport {
                kind,
                message: kind.friendly_message().to_string(),
            },
            None => AppError::Http {
                status: self.status,
                message: self.message(default),
            },
        }
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_MESSAGE_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_response_is_not_ok_and_explains_itself() {
        let response = ApiResponse::synthesized(FailureKind::ConnectionRefused);
        assert!(!response.ok());
        assert_eq!(response.status(), SYNTHETIC_STATUS);
        assert!(response.message("fallback").contains("Unable to connect"));

        let body: Value = response.json().unwrap();
        assert_eq!(body["error"], "CONNECTION_REFUSED");
    }

    #[test]
    fn message_prefers_server_field_then_default() {
        let with_message = ApiResponse::from_parts(401, r#"{"message":"Invalid credentials"}"#.into());
        let with_error = ApiResponse::from_parts(400, r#"{"error":"bad email"}"#.into());
        let empty_json = ApiResponse::from_parts(500, "{}".into());
        let plain = ApiResponse::from_parts(502, "  Bad Gateway ".into());
        let blank = ApiResponse::from_parts(500, String::new());

        assert_eq!(with_message.message("Login failed"), "Invalid credentials");
        assert_eq!(with_error.message("x"), "bad email");
        assert_eq!(empty_json.message("Login failed"), "Login failed");
        assert_eq!(plain.message("x"), "Bad Gateway");
        assert_eq!(blank.message("Failed to register"), "Failed to register");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let response = ApiResponse::from_parts(500, "x".repeat(1000));
        assert_eq!(response.message("d").len(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn into_result_maps_failures() {
        let http = ApiResponse::from_parts(403, r#"{"message":"nope"}"#.into());
        assert_eq!(
            http.into_result("d").unwrap_err(),
            AppError::Http {
                status: 403,
                message: "nope".to_string()
            }
        );

        let missing = ApiResponse::synthesized(FailureKind::NotAuthenticated);
        assert_eq!(missing.into_result("d").unwrap_err(), AppError::NotAuthenticated);

        let network = ApiResponse::synthesized(FailureKind::NetworkError);
        assert!(matches!(
            network.into_result("d").unwrap_err(),
            AppError::Transport { kind: FailureKind::NetworkError, .. }
        ));

        assert!(ApiResponse::from_parts(204, String::new()).into_result("d").is_ok());
    }

    #[tokio::test]
    async fn connection_refused_is_classified() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{addr}/users"))
            .send()
            .await
            .unwrap_err();

        // Some resolvers hide the io cause behind the connector error.
        assert!(matches!(
            FailureKind::classify(&err),
            FailureKind::ConnectionRefused | FailureKind::NetworkError
        ));
    }
}
