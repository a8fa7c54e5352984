//! File-backed bearer-token storage.
//!
//! The token obtained at login is persisted as JSON under
//! `~/.dochive/credentials.json` and read back on demand by the
//! [`TokenProvider`] implementation. Nothing else is stored locally;
//! account state lives on the server.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::traits::TokenProvider;

const CREDENTIALS_DIR: &str = ".dochive";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Stored login state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for API authentication.
    pub access_token: Option<String>,
    /// Token expiry as a Unix timestamp in seconds.
    pub expires_at: Option<i64>,
    /// The authenticated account name.
    pub username: Option<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether the token is past its expiry. No expiry recorded counts as
    /// expired, forcing a fresh login.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => chrono::Utc::now().timestamp() >= at,
            None => true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.has_token() && !self.is_expired()
    }
}

/// Reads and writes [`Credentials`] at a fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store under the user's home directory (`~/.dochive/credentials.json`).
    ///
    /// Falls back to a relative path when no home directory is resolvable
    /// (e.g. stripped-down containers).
    pub fn new() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        }
    }

    /// Store at an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load stored credentials. `Ok(None)` when no file exists yet.
    pub fn load(&self) -> std::io::Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let creds = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Some(creds))
    }

    /// Persist credentials, creating the parent directory if needed.
    pub fn save(&self, creds: &Credentials) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, creds)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writer.flush()
    }

    /// Remove stored credentials. Missing file is not an error.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenProvider for CredentialStore {
    async fn bearer_token(&self) -> Option<String> {
        match self.load() {
            Ok(Some(creds)) => creds.access_token,
            Ok(None) => None,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "failed to read credentials");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::with_path(dir.path().join("credentials.json"))
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().unwrap(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let creds = Credentials {
            access_token: Some("tok-abc".to_string()),
            expires_at: Some(chrono::Utc::now().timestamp() + 3600),
            username: Some("archivist".to_string()),
        };
        store.save(&creds).unwrap();
        assert_eq!(store.load().unwrap(), Some(creds));
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Credentials::new()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Second clear is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn expiry_rules() {
        let mut creds = Credentials::new();
        assert!(!creds.has_token());
        assert!(creds.is_expired());
        assert!(!creds.is_valid());

        creds.access_token = Some("tok".to_string());
        creds.expires_at = Some(chrono::Utc::now().timestamp() + 60);
        assert!(creds.is_valid());

        creds.expires_at = Some(0);
        assert!(creds.is_expired());
        assert!(!creds.is_valid());
    }

    #[tokio::test]
    async fn token_provider_reads_stored_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.bearer_token().await, None);

        store
            .save(&Credentials {
                access_token: Some("bearer-me".to_string()),
                expires_at: None,
                username: None,
            })
            .unwrap();
        assert_eq!(store.bearer_token().await.as_deref(), Some("bearer-me"));
    }

    #[tokio::test]
    async fn corrupt_file_yields_no_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = CredentialStore::with_path(path);
        assert!(store.load().is_err());
        assert_eq!(store.bearer_token().await, None);
    }
}
