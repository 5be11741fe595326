//! Client-side session storage: the `auth_token` cookie holding the login
//! payload and the `csrf_token` nonce. There is no in-memory cache; every call
//! goes back to the cookie jar, so a logout in one process is observed by the
//! next command in another.

pub mod csrf;
pub mod jar;

use crate::{
    api::types::{null_as_default, string_or_number},
    error::AppError,
};
use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

pub use jar::{Cookie, CookieJar, CookieOptions, SameSite};

pub const AUTH_COOKIE: &str = "auth_token";
pub const SESSION_TTL_DAYS: i64 = 7;

/// The authenticated actor as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permission: Vec<String>,
}

#[derive(Deserialize)]
struct SessionFields {
    token: String,
    user: SessionUser,
}

/// Login payload: `{token, user}`.
///
/// The typed fields are a read-only view; serializing writes back the payload
/// exactly as the server sent it.
#[derive(Clone, PartialEq)]
pub struct Session {
    token: String,
    user: SessionUser,
    raw: Value,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let fields = SessionFields::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Self {
            token: fields.token,
            user: fields.user,
            raw,
        })
    }
}

impl Serialize for Session {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl Session {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    /// The payload as received from the login endpoint.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn has_permission(&self, capability: &str) -> bool {
        self.user.permission.iter().any(|p| p == capability)
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    jar: CookieJar,
}

impl SessionStore {
    #[must_use]
    pub fn open(state_dir: &Path) -> Self {
        Self {
            jar: CookieJar::new(state_dir),
        }
    }

    #[must_use]
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Reads and parses the auth cookie. Absence, expiry, storage failures and
    /// malformed payloads all yield `None`.
    #[must_use]
    pub fn get_session(&self) -> Option<Session> {
        let raw = match self.jar.get(AUTH_COOKIE) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("failed to read session cookie: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("failed to parse session cookie: {err}");
                None
            }
        }
    }

    /// Persists the login payload with a 7-day expiry.
    ///
    /// # Errors
    /// Returns an error if the payload cannot be encoded or the jar cannot be written.
    pub fn set_session(&self, session: &Session) -> Result<(), AppError> {
        let payload = serde_json::to_string(session)
            .map_err(|err| AppError::Storage(format!("Failed to encode session: {err}")))?;
        let options = CookieOptions {
            max_age: Some(Duration::days(SESSION_TTL_DAYS)),
            ..CookieOptions::default()
        };
        self.jar.set(AUTH_COOKIE, &payload, options)
    }

    /// # Errors
    /// Returns an error if the jar cannot be written.
    pub fn clear_session(&self) -> Result<(), AppError> {
        self.jar.remove(AUTH_COOKIE)
    }

    /// Returns the stored CSRF nonce, creating one on first use.
    ///
    /// # Errors
    /// Returns an error if the jar cannot be read or written.
    pub fn csrf_token(&self) -> Result<String, AppError> {
        match self.jar.get(csrf::CSRF_COOKIE)? {
            Some(token) if !token.is_empty() => Ok(token),
            _ => self.rotate_csrf_token(),
        }
    }

    /// Replaces the CSRF nonce with a freshly generated one.
    ///
    /// # Errors
    /// Returns an error if the jar cannot be written.
    pub fn rotate_csrf_token(&self) -> Result<String, AppError> {
        let token = csrf::generate();
        self.jar
            .set(csrf::CSRF_COOKIE, &token, CookieOptions::default())?;
        Ok(token)
    }

    /// Stores a server-issued CSRF token. Implausible values are ignored.
    ///
    /// # Errors
    /// Returns an error if the jar cannot be written.
    pub fn adopt_csrf_token(&self, value: &str) -> Result<(), AppError> {
        let Some(token) = csrf::normalize(value) else {
            warn!("ignoring malformed server CSRF token");
            return Ok(());
        };
        if self.jar.get(csrf::CSRF_COOKIE)?.as_deref() == Some(token) {
            return Ok(());
        }
        self.jar
            .set(csrf::CSRF_COOKIE, token, CookieOptions::default())
    }
}
