use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Buffer time before expiry to trigger a token refresh (5 minutes)
const TOKEN_REFRESH_BUFFER_MINUTES: i64 = 5;

/// A GoTrue session as persisted between runs. `expires_at` is computed
/// from the `expires_in` the token endpoint reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the access token expires soon enough to be worth refreshing
    pub fn needs_refresh(&self) -> bool {
        Utc::now() > self.expires_at - Duration::minutes(TOKEN_REFRESH_BUFFER_MINUTES)
    }
}

/// Disk-backed session holder. The refresh token outlives the access token,
/// so an expired session is still loaded to allow a silent refresh.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. Returns true when one was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;
            self.data = Some(data);
            return Ok(true);
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data and remove the file
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Replace the session with fresh data
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Bearer token if a session exists and has not expired
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .filter(|d| !d.is_expired())
            .map(|d| d.access_token.as_str())
    }

    /// Auth account id if a session exists
    pub fn user_id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.user_id.as_str())
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_expiring_in(minutes: i64) -> SessionData {
        SessionData {
            access_token: "tok".to_string(),
            refresh_token: "ref".to_string(),
            user_id: "abc".to_string(),
            email: "laura@club.test".to_string(),
            expires_at: Utc::now() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_expiry_and_refresh_window() {
        let fresh = session_expiring_in(60);
        assert!(!fresh.is_expired());
        assert!(!fresh.needs_refresh());

        let closing = session_expiring_in(2);
        assert!(!closing.is_expired());
        assert!(closing.needs_refresh());

        let gone = session_expiring_in(-1);
        assert!(gone.is_expired());
        assert!(gone.needs_refresh());
    }

    #[test]
    fn test_token_hidden_once_expired() {
        let mut session = Session::new(std::env::temp_dir());
        session.update(session_expiring_in(-1));
        assert!(session.token().is_none());
        assert_eq!(session.user_id(), Some("abc"));
        assert!(!session.is_valid());
    }
}
