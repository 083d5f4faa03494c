//! Auth collaborator trait.
//!
//! Defines the interface the session lifecycle uses to authenticate users.

use super::model::{AuthSuccess, LoginCredentials};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract authentication collaborator.
///
/// This trait decouples the session lifecycle from the concrete auth
/// backend (the in-process fixture here, a remote service in a deployed
/// build).
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates a user with email and password.
    ///
    /// # Returns
    ///
    /// - `Ok(AuthSuccess)`: Authentication succeeded; carries the user,
    ///   the issued token and its expiry
    /// - `Err(PumpMasterError::InvalidCredentials)`: Unknown email or
    ///   wrong password
    /// - `Err(PumpMasterError::AuthInternal)`: The backend failed
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSuccess>;
}
