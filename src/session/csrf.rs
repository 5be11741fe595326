//! Anti-forgery nonce attached to outgoing requests as `X-CSRF-Token`.
//!
//! A client-generated nonce only helps if the server checks it against the
//! cookie it issued. When the API returns its own `X-CSRF-Token` header the
//! store adopts that value instead.

use rand::{distributions::Alphanumeric, Rng};

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

const TOKEN_LEN: usize = 32;

/// Generates a fresh nonce from the thread-local CSPRNG.
#[must_use]
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Accepts a server-issued token only if it is a plausible header value.
#[must_use]
pub fn normalize(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 256 || !trimmed.chars().all(|c| c.is_ascii_graphic()) {
        None
    } else {
        Some(trimmed)
    }
}
