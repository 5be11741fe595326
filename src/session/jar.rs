//! File-backed cookie jar. Cookies live in a single JSON document inside the
//! state directory. The file is re-read on every access so separate processes
//! observe each other's writes, and it is replaced atomically on every write.

use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const JAR_FILE: &str = "cookies.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

/// Attributes applied when a cookie is written.
#[derive(Clone, Copy, Debug)]
pub struct CookieOptions {
    pub secure: bool,
    pub same_site: SameSite,
    /// `None` keeps the cookie until it is removed explicitly.
    pub max_age: Option<Duration>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Strict,
            max_age: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,
    pub secure: bool,
    pub same_site: SameSite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

#[derive(Clone, Debug)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    /// Jar stored as `cookies.json` under `state_dir`. Nothing is touched on disk
    /// until the first write.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(JAR_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value of a live cookie.
    ///
    /// # Errors
    /// Returns an error if the jar file exists but cannot be read.
    pub fn get(&self, name: &str) -> Result<Option<String>, AppError> {
        self.get_at(name, Utc::now())
    }

    pub(crate) fn get_at(&self, name: &str, now: DateTime<Utc>) -> Result<Option<String>, AppError> {
        let cookies = self.load()?;
        Ok(cookies
            .get(name)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.clone()))
    }

    /// Returns the stored cookie including its attributes, expired or not.
    ///
    /// # Errors
    /// Returns an error if the jar file exists but cannot be read.
    pub fn cookie(&self, name: &str) -> Result<Option<Cookie>, AppError> {
        Ok(self.load()?.remove(name))
    }

    /// Writes a cookie, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the jar cannot be persisted.
    pub fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<(), AppError> {
        self.set_at(name, value, options, Utc::now())
    }

    pub(crate) fn set_at(
        &self,
        name: &str,
        value: &str,
        options: CookieOptions,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut cookies = self.load()?;
        cookies.retain(|_, cookie| !cookie.is_expired(now));
        cookies.insert(
            name.to_string(),
            Cookie {
                value: value.to_string(),
                secure: options.secure,
                same_site: options.same_site,
                expires: options.max_age.map(|max_age| now + max_age),
            },
        );
        debug!(cookie = name, "writing cookie");
        self.save(&cookies)
    }

    /// Deletes a cookie; deleting a missing cookie is not an error.
    ///
    /// # Errors
    /// Returns an error if the jar cannot be persisted.
    pub fn remove(&self, name: &str) -> Result<(), AppError> {
        let mut cookies = self.load()?;
        if cookies.remove(name).is_none() {
            return Ok(());
        }
        debug!(cookie = name, "removing cookie");
        self.save(&cookies)
    }

    fn load(&self) -> Result<BTreeMap<String, Cookie>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        // A damaged jar behaves like an empty one; the next write replaces it.
        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("ignoring unreadable cookie jar {}: {err}", self.path.display());
            BTreeMap::new()
        }))
    }

    fn save(&self, cookies: &BTreeMap<String, Cookie>) -> Result<(), AppError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        create_private_dir(dir)?;

        let payload = serde_json::to_vec_pretty(cookies)
            .map_err(|err| AppError::Storage(format!("Failed to encode cookie jar: {err}")))?;

        // NamedTempFile is created 0600 under a unique name
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir)?;
    Ok(())
}
