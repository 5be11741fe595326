use crate::{api::ApiClient, session::SessionStore};
use anyhow::{Context, Result};
use std::{path::PathBuf, time::Duration};

#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub state_dir: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: Option<String>, state_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            api_url,
            state_dir,
            timeout,
        }
    }

    #[must_use]
    pub fn store(&self) -> SessionStore {
        SessionStore::open(&self.state_dir)
    }

    /// # Errors
    /// Returns an error if `--api-url` is missing or invalid.
    pub fn api_client(&self) -> Result<ApiClient> {
        let api_url = self
            .api_url
            .as_deref()
            .context("missing required argument: --api-url (or USERADMIN_API_URL)")?;

        ApiClient::new(api_url, self.store(), self.timeout).context("invalid API configuration")
    }
}

/// Default cookie jar location: `<config dir>/useradmin`.
///
/// # Errors
/// Returns an error if the platform has no config directory.
pub fn default_state_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")))
        .context("cannot determine a config directory; pass --state-dir")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_global_args() {
        let dir = tempdir().unwrap();
        let args = GlobalArgs::new(
            Some("http://localhost:3000/".to_string()),
            dir.path().to_path_buf(),
            Duration::from_secs(10),
        );
        let client = args.api_client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");
        assert_eq!(client.store().jar().path(), args.store().jar().path());
    }

    #[test]
    fn test_missing_api_url() {
        let args = GlobalArgs::new(None, PathBuf::from("/tmp"), Duration::from_secs(1));
        let err = args.api_client().unwrap_err();
        assert!(err.to_string().contains("--api-url"));
    }

    #[test]
    fn test_invalid_api_url() {
        let args = GlobalArgs::new(
            Some("ftp://files.tld".to_string()),
            PathBuf::from("/tmp"),
            Duration::from_secs(1),
        );
        assert!(args.api_client().is_err());
    }
}
