//! Token store trait.
//!
//! Defines the interface for persisting session credentials between runs.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the persisted session token.
///
/// A client-local key-value slot: one `auth_token` entry plus an optional
/// `refresh_token`. Implementations must tolerate the backing file being
/// absent.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the persisted session token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))`: A token is stored
    /// - `Ok(None)`: Nothing stored
    /// - `Err(_)`: Storage access failed
    async fn load_token(&self) -> Result<Option<String>>;

    /// Persists the session token.
    async fn store_token(&self, token: &str) -> Result<()>;

    /// Removes the session token, if any.
    async fn remove_token(&self) -> Result<()>;

    /// Reads the persisted refresh token.
    async fn load_refresh_token(&self) -> Result<Option<String>>;

    /// Persists the refresh token.
    async fn store_refresh_token(&self, token: &str) -> Result<()>;

    /// Removes the refresh token, if any.
    async fn remove_refresh_token(&self) -> Result<()>;

    /// Removes every stored credential.
    async fn clear_all(&self) -> Result<()>;
}
