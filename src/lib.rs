//! # useradmin
//!
//! Terminal client for a user-administration REST API: sign in, register, and
//! list, create, edit or delete users.
//!
//! ## Session handling
//!
//! A successful login returns `{token, user}`. The payload is stored verbatim
//! in the `auth_token` cookie of a file-backed cookie jar, next to a
//! `csrf_token` nonce. Every protected call re-reads the jar; there is no
//! in-memory session cache. Logout deletes the cookie.
//!
//! ## Authorization
//!
//! The signed-in user's `permission` list gates the mutating actions
//! (`create_user`, `edit_user`, `delete_user`). Gating is a UI affordance
//! only: the backend must enforce the same checks.
//!
//! ## Data flow
//!
//! Every mutation is fire-once and followed by a full refetch of the user
//! list. Transport failures never escape the API client; they come back as
//! response-shaped values with `ok == false`.

pub mod api;
pub mod auth;
pub mod cli;
pub mod error;
pub mod session;
pub mod ui;
pub mod users;

pub use error::AppError;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("useradmin/"));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
