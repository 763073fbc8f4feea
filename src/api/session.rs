//! Persisted session
//!
//! The bearer token survives restarts in `session.toml` under the data
//! directory, sealed with [`TokenCipher`]. It is read once at startup and
//! handed to the client as an explicit [`AuthContext`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::auth::AuthContext;
use crate::constants::SESSION_FILE;
use crate::error::Result;
use crate::helpers::{TokenCipher, ensure_dir, get_or_create_data_dir};

const KEY_FILE: &str = "session.key";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    /// Sealed bearer token
    token: String,
    saved_at: DateTime<Utc>,
}

/// Session file plus the cipher protecting it
pub struct SessionStore {
    path: PathBuf,
    cipher: TokenCipher,
}

impl SessionStore {
    /// Store in the platform data directory
    pub fn open_default() -> Result<Self> {
        Self::open(&get_or_create_data_dir()?)
    }

    /// Store in `dir`, creating it and the key file when missing
    pub fn open(dir: &Path) -> Result<Self> {
        let dir = ensure_dir(dir)?;
        let cipher = TokenCipher::load_or_create(&dir.join(KEY_FILE))?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
            cipher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, auth: &AuthContext) -> Result<()> {
        let stored = StoredSession {
            token: self.cipher.seal(auth.token())?,
            saved_at: Utc::now(),
        };
        fs::write(&self.path, toml::to_string_pretty(&stored)?)?;
        info!(path = ?self.path, "Session saved");
        Ok(())
    }

    /// Saved credential, if any. A file that cannot be read back is
    /// treated as no session and removed.
    pub fn load(&self) -> Result<Option<AuthContext>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let restored = toml::from_str::<StoredSession>(&raw)
            .map_err(crate::error::Error::from)
            .and_then(|stored| self.cipher.open(&stored.token));
        match restored {
            Ok(token) if !token.is_empty() => Ok(Some(AuthContext::new(token))),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Forget the credential (logout)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Session cleared");
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::open(tmp.path()).unwrap();
        assert!(!store.is_authenticated());

        store.save(&AuthContext::new("jwt-token")).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("jwt-token"));
        assert_eq!(store.load().unwrap(), Some(AuthContext::new("jwt-token")));

        // A second store over the same directory reuses the key
        let reopened = SessionStore::open(tmp.path()).unwrap();
        assert!(reopened.is_authenticated());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::open(tmp.path()).unwrap();
        fs::write(store.path(), "token = \"garbage\"\nsaved_at = 1\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }
}
