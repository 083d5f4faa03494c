//! File-backed token persistence.
//!
//! Stores the session token pair in `credentials.toml` under the user
//! config directory: one `auth_token` slot plus an optional
//! `refresh_token`.

use std::path::PathBuf;

use async_trait::async_trait;
use pumpmaster_core::auth::TokenStore;
use pumpmaster_core::error::{PumpMasterError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::PumpMasterPaths;
use crate::storage::TomlFileStore;

/// On-disk shape of `credentials.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl StoredCredentials {
    fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.refresh_token.is_none()
    }
}

/// Token store backed by a TOML file in the user config directory.
pub struct FileTokenStore {
    store: TomlFileStore<StoredCredentials>,
}

impl FileTokenStore {
    /// Creates a store rooted at the default credentials path.
    pub fn new() -> Result<Self> {
        let path = PumpMasterPaths::credentials_file()
            .map_err(|e| PumpMasterError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store backed by a specific file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            store: TomlFileStore::new(path),
        }
    }

    fn load_credentials(&self) -> Result<StoredCredentials> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    /// Saves the credentials, or deletes the file once both slots are empty.
    fn persist(&self, credentials: &StoredCredentials) -> Result<()> {
        if credentials.is_empty() {
            debug!("[FileTokenStore] No credentials left, removing file");
            return self.store.remove();
        }
        self.store.save(credentials)?;
        self.restrict_permissions()
    }

    fn store_field<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut StoredCredentials),
    {
        self.store.update(StoredCredentials::default(), |creds| {
            apply(creds);
            Ok(())
        })?;
        self.restrict_permissions()
    }

    /// Sets file permissions to 600 (user read/write only) on Unix.
    fn restrict_permissions(&self) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(self.store.path(), permissions)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load_token(&self) -> Result<Option<String>> {
        Ok(self.load_credentials()?.auth_token)
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        self.store_field(|creds| creds.auth_token = Some(token))
    }

    async fn remove_token(&self) -> Result<()> {
        let mut creds = self.load_credentials()?;
        creds.auth_token = None;
        self.persist(&creds)
    }

    async fn load_refresh_token(&self) -> Result<Option<String>> {
        Ok(self.load_credentials()?.refresh_token)
    }

    async fn store_refresh_token(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        self.store_field(|creds| creds.refresh_token = Some(token))
    }

    async fn remove_refresh_token(&self) -> Result<()> {
        let mut creds = self.load_credentials()?;
        creds.refresh_token = None;
        self.persist(&creds)
    }

    async fn clear_all(&self) -> Result<()> {
        debug!("[FileTokenStore] Clearing all credentials");
        self.store.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::with_path(dir.path().join("credentials.toml"))
    }

    #[tokio::test]
    async fn test_load_token_from_missing_file() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = store_in(&dir);

        let token = store.load_token().await.expect("Should load");
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = store_in(&dir);

        store.store_token("header.claims.sig").await.expect("Should store");
        store
            .store_refresh_token("refresh-001")
            .await
            .expect("Should store refresh");

        let token = store.load_token().await.expect("Should load");
        assert_eq!(token.as_deref(), Some("header.claims.sig"));
        let refresh = store.load_refresh_token().await.expect("Should load refresh");
        assert_eq!(refresh.as_deref(), Some("refresh-001"));
    }

    #[tokio::test]
    async fn test_remove_token_keeps_refresh_token() {
        let dir = TempDir::new().expect("Should create temp dir");
        let store = store_in(&dir);

        store.store_token("tok").await.expect("Should store");
        store
            .store_refresh_token("refresh")
            .await
            .expect("Should store refresh");
        store.remove_token().await.expect("Should remove");

        assert!(store.load_token().await.expect("Should load").is_none());
        let refresh = store.load_refresh_token().await.expect("Should load refresh");
        assert_eq!(refresh.as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_removing_last_credential_deletes_file() {
        let dir = TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("credentials.toml");
        let store = FileTokenStore::with_path(path.clone());

        store.store_token("tok").await.expect("Should store");
        assert!(path.exists());

        store.remove_token().await.expect("Should remove");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_clear_all_removes_both_tokens() {
        let dir = TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("credentials.toml");
        let store = FileTokenStore::with_path(path.clone());

        store.store_token("tok").await.expect("Should store");
        store
            .store_refresh_token("refresh")
            .await
            .expect("Should store refresh");
        store.clear_all().await.expect("Should clear");

        assert!(!path.exists());
        assert!(store.load_token().await.expect("Should load").is_none());
        assert!(
            store
                .load_refresh_token()
                .await
                .expect("Should load refresh")
                .is_none()
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_credentials_file_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("credentials.toml");
        let store = FileTokenStore::with_path(path.clone());

        store.store_token("tok").await.expect("Should store");

        let mode = std::fs::metadata(&path)
            .expect("Should stat credentials file")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
