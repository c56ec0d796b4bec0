//! Session token storage.
//!
//! Stores the access (and optional refresh) token in `<base>/session.json`
//! with restricted permissions (0600). Tokens are never logged or displayed in full.
//!
//! Validity is never checked locally; the server decides on the next request.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Stored credentials for the single signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The access token (short-lived)
    pub access: String,
    /// The refresh token, only sent back on logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl Session {
    pub fn new(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
        }
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }
}

/// Read/write access to the persisted session.
///
/// Injected into whatever needs the token so tests can swap in
/// [`MemorySessionStore`].
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, `None` when signed out.
    fn get(&self) -> Result<Option<Session>>;

    /// Replaces the stored session.
    fn set(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Returns whether one existed.
    fn clear(&self) -> Result<bool>;
}

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new(paths::session_path())
    }
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>> {
        let path = &self.path;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        // An unreadable file counts as no session so a fresh login can replace it.
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok((!session.access.is_empty()).then_some(session)),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable session file: {err}");
                Ok(None)
            }
        }
    }

    fn set(&self, session: &Session) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        tracing::debug!(path = %path.display(), "session stored");
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        let path = &self.path;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "session cleared");
        Ok(true)
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.inner
            .lock()
            .map_err(|_poisoned| anyhow::anyhow!("session store lock poisoned"))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, session: &Session) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        Ok(self.lock()?.take().is_some())
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    match token.char_indices().nth(12) {
        Some((cut, _)) if token.len() > 16 => format!("{}...", &token[..cut]),
        _ => "***".to_string(),
    }
}
