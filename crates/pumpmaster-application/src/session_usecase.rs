//! Session lifecycle use case.
//!
//! This module provides the `SessionUseCase` which owns the authenticated
//! identity for the process and coordinates the `AuthService` and
//! `TokenStore` collaborators so the two never disagree about whether a
//! user is logged in.

use pumpmaster_core::auth::{
    AuthService, LoginCredentials, Permission, Session, TokenStore, token,
};
use pumpmaster_core::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the authenticated session.
///
/// # Responsibilities
///
/// - Restoring a session from the persisted token at startup, silently
///   falling back to unauthenticated when the token is invalid
/// - Logging in through the auth collaborator and persisting the issued
///   token before the session becomes observable
/// - Logging out and purging every persisted credential
/// - Answering permission checks for the current identity
///
/// # Thread Safety
///
/// The session snapshot lives behind a `RwLock`; collaborators are shared
/// `Arc<dyn Trait>` handles, so one instance serves the whole process.
pub struct SessionUseCase {
    /// Store for the persisted token pair
    token_store: Arc<dyn TokenStore>,
    /// Auth collaborator performing credential checks
    auth_service: Arc<dyn AuthService>,
    /// Current session; `None` while unauthenticated
    session: RwLock<Option<Session>>,
}

impl SessionUseCase {
    pub fn new(token_store: Arc<dyn TokenStore>, auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            token_store,
            auth_service,
            session: RwLock::new(None),
        }
    }

    /// Restores the session from the persisted token, if possible.
    ///
    /// Every failure path is silent: a missing token is a plain
    /// unauthenticated start, and a malformed, expired, or claim-deficient
    /// token is purged from the store so the next start is clean. Nothing
    /// here returns an error; failures are only logged.
    ///
    /// # Returns
    ///
    /// - `Some(session)`: the token decoded and validated; the session is
    ///   now populated.
    /// - `None`: no usable token; the session stays absent.
    pub async fn restore_session(&self) -> Option<Session> {
        tracing::debug!("[SessionUseCase] Attempting session restore");

        // 1. Read the persisted token
        let stored = match self.token_store.load_token().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("[SessionUseCase] Failed to read token store: {}", e);
                return None;
            }
        };
        let Some(raw_token) = stored else {
            tracing::debug!("[SessionUseCase] No persisted token found");
            return None;
        };

        // 2. Decode and validate; purge on any token fault
        let claims = match token::decode(&raw_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(
                    "[SessionUseCase] Discarding persisted token ({}): {}",
                    e.code(),
                    e
                );
                if let Err(purge_err) = self.token_store.clear_all().await {
                    tracing::warn!(
                        "[SessionUseCase] Failed to purge invalid credentials: {}",
                        purge_err
                    );
                }
                return None;
            }
        };

        // 3. Populate the session
        let session = claims.to_session();
        tracing::info!(
            "[SessionUseCase] Restored session for {} (role: {}, expires: {})",
            session.email,
            session.role,
            session.expires_at
        );
        *self.session.write().await = Some(session.clone());
        Some(session)
    }

    /// Logs in with the given credentials.
    ///
    /// The issued token (and refresh token when present) is persisted
    /// before the session becomes observable, so a populated session
    /// always has a stored token behind it.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidCredentials` / `AuthInternal` from the auth
    /// collaborator and storage errors from the token store. On any error
    /// the session is absent; it is never partially populated.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        tracing::info!("[SessionUseCase] Logging in as {}", email);

        let credentials = LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        // 1. Delegate to the auth collaborator
        let success = match self.auth_service.login(&credentials).await {
            Ok(success) => success,
            Err(e) => {
                tracing::warn!("[SessionUseCase] Login failed for {}: {}", email, e);
                *self.session.write().await = None;
                return Err(e);
            }
        };

        // 2. Persist the token pair before populating the session
        self.token_store.store_token(&success.token).await?;
        if let Some(refresh) = &success.refresh_token {
            self.token_store.store_refresh_token(refresh).await?;
        }

        // 3. Populate and return
        let session = Session::from_user(&success.user, success.expires_at);
        tracing::info!(
            "[SessionUseCase] Login successful for {} (role: {})",
            session.email,
            session.role
        );
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Logs out: the session is cleared first, then every persisted
    /// credential is purged.
    ///
    /// # Errors
    ///
    /// Returns the token store error when the purge fails; the in-memory
    /// session is already gone at that point.
    pub async fn logout(&self) -> Result<()> {
        let previous = self.session.write().await.take();
        if let Some(session) = previous {
            tracing::info!("[SessionUseCase] Logged out {}", session.email);
        }
        self.token_store.clear_all().await
    }

    /// Snapshot of the current session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Permission check for the current identity; trivially `false` while
    /// unauthenticated.
    pub async fn has_permission(&self, permission: Permission) -> bool {
        match &*self.session.read().await {
            Some(session) => session.has_permission(permission),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use pumpmaster_core::PumpMasterError;
    use pumpmaster_core::auth::{AuthSuccess, Role, TokenClaims, User};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockTokenStore {
        tokens: Mutex<HashMap<&'static str, String>>,
    }

    impl MockTokenStore {
        fn new() -> Self {
            Self {
                tokens: Mutex::new(HashMap::new()),
            }
        }

        fn with_token(token: &str) -> Self {
            let store = Self::new();
            store
                .tokens
                .lock()
                .unwrap()
                .insert("auth_token", token.to_string());
            store
        }

        fn stored_token(&self) -> Option<String> {
            self.tokens.lock().unwrap().get("auth_token").cloned()
        }

        fn stored_refresh(&self) -> Option<String> {
            self.tokens.lock().unwrap().get("refresh_token").cloned()
        }
    }

    #[async_trait]
    impl TokenStore for MockTokenStore {
        async fn load_token(&self) -> Result<Option<String>> {
            Ok(self.stored_token())
        }

        async fn store_token(&self, token: &str) -> Result<()> {
            self.tokens
                .lock()
                .unwrap()
                .insert("auth_token", token.to_string());
            Ok(())
        }

        async fn remove_token(&self) -> Result<()> {
            self.tokens.lock().unwrap().remove("auth_token");
            Ok(())
        }

        async fn load_refresh_token(&self) -> Result<Option<String>> {
            Ok(self.stored_refresh())
        }

        async fn store_refresh_token(&self, token: &str) -> Result<()> {
            self.tokens
                .lock()
                .unwrap()
                .insert("refresh_token", token.to_string());
            Ok(())
        }

        async fn remove_refresh_token(&self) -> Result<()> {
            self.tokens.lock().unwrap().remove("refresh_token");
            Ok(())
        }

        async fn clear_all(&self) -> Result<()> {
            self.tokens.lock().unwrap().clear();
            Ok(())
        }
    }

    struct MockAuthService;

    #[async_trait]
    impl AuthService for MockAuthService {
        async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSuccess> {
            if credentials.email != "admin@informag.com" || credentials.password != "admin123" {
                return Err(PumpMasterError::InvalidCredentials);
            }
            let now = Utc::now();
            let expires_at = now + Duration::hours(24);
            let user = User {
                id: "user-admin-001".to_string(),
                email: credentials.email.clone(),
                name: "Admin".to_string(),
                role: Role::Admin,
                permissions: vec![
                    "view".to_string(),
                    "edit".to_string(),
                    "delete".to_string(),
                    "manage".to_string(),
                ],
            };
            let claims = TokenClaims {
                user_id: user.id.clone(),
                email: user.email.clone(),
                role: user.role,
                name: Some(user.name.clone()),
                permissions: user.permissions.clone(),
                iat: now.timestamp(),
                exp: expires_at.timestamp(),
            };
            Ok(AuthSuccess {
                token: token::encode(&claims)?,
                refresh_token: Some("refresh-fixture".to_string()),
                user,
                expires_at,
            })
        }
    }

    fn usecase_with_store(store: Arc<MockTokenStore>) -> SessionUseCase {
        SessionUseCase::new(store, Arc::new(MockAuthService))
    }

    fn token_with(name: Option<&str>, email: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: "user-admin-001".to_string(),
            email: email.to_string(),
            role: Role::Admin,
            name: name.map(|n| n.to_string()),
            permissions: vec!["view".to_string()],
            iat: now,
            exp: now + exp_offset_secs,
        };
        token::encode(&claims).unwrap()
    }

    #[tokio::test]
    async fn test_restore_without_token_is_noop() {
        let store = Arc::new(MockTokenStore::new());
        let usecase = usecase_with_store(store.clone());

        assert!(usecase.restore_session().await.is_none());
        assert!(!usecase.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_valid_token_populates_session() {
        let store = Arc::new(MockTokenStore::with_token(&token_with(
            Some("Admin"),
            "admin@informag.com",
            86400,
        )));
        let usecase = usecase_with_store(store.clone());

        let session = usecase.restore_session().await.unwrap();
        assert_eq!(session.email, "admin@informag.com");
        assert_eq!(session.name, "Admin");
        assert_eq!(session.role, Role::Admin);
        assert!(usecase.is_authenticated().await);
        // The valid token stays persisted
        assert!(store.stored_token().is_some());
    }

    #[tokio::test]
    async fn test_restore_expired_token_purges_store() {
        let store = Arc::new(MockTokenStore::with_token(&token_with(
            Some("Admin"),
            "admin@informag.com",
            -3600,
        )));
        let usecase = usecase_with_store(store.clone());

        assert!(usecase.restore_session().await.is_none());
        assert!(!usecase.is_authenticated().await);
        assert!(store.stored_token().is_none());
    }

    #[tokio::test]
    async fn test_restore_token_missing_email_purges_despite_valid_expiry() {
        // Empty email counts as a missing claim
        let store = Arc::new(MockTokenStore::with_token(&token_with(None, "", 86400)));
        let usecase = usecase_with_store(store.clone());

        assert!(usecase.restore_session().await.is_none());
        assert!(store.stored_token().is_none());
    }

    #[tokio::test]
    async fn test_restore_garbage_token_purges_store() {
        let store = Arc::new(MockTokenStore::with_token("not-a-token"));
        let usecase = usecase_with_store(store.clone());

        assert!(usecase.restore_session().await.is_none());
        assert!(store.stored_token().is_none());
    }

    #[tokio::test]
    async fn test_restore_derives_name_from_email_local_part() {
        let store = Arc::new(MockTokenStore::with_token(&token_with(
            None,
            "a@b.com",
            86400,
        )));
        let usecase = usecase_with_store(store);

        let session = usecase.restore_session().await.unwrap();
        assert_eq!(session.name, "a");
    }

    #[tokio::test]
    async fn test_login_success_persists_token_pair() {
        let store = Arc::new(MockTokenStore::new());
        let usecase = usecase_with_store(store.clone());

        let session = usecase.login("admin@informag.com", "admin123").await.unwrap();
        assert_eq!(session.role, Role::Admin);
        assert!(session.has_permission(Permission::Delete));

        // The issued token decodes back to the same identity
        let decoded = token::decode(&store.stored_token().unwrap()).unwrap();
        assert_eq!(decoded.email, "admin@informag.com");
        assert_eq!(decoded.role, Role::Admin);
        assert_eq!(store.stored_refresh().as_deref(), Some("refresh-fixture"));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_absent() {
        let store = Arc::new(MockTokenStore::new());
        let usecase = usecase_with_store(store.clone());

        let err = usecase
            .login("admin@informag.com", "wrong-password")
            .await
            .unwrap_err();
        assert!(err.is_invalid_credentials());
        assert!(!usecase.is_authenticated().await);
        assert!(store.stored_token().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_store() {
        let store = Arc::new(MockTokenStore::new());
        let usecase = usecase_with_store(store.clone());
        usecase.login("admin@informag.com", "admin123").await.unwrap();

        usecase.logout().await.unwrap();
        assert!(!usecase.is_authenticated().await);
        assert!(store.stored_token().is_none());
        assert!(store.stored_refresh().is_none());
    }

    #[tokio::test]
    async fn test_has_permission_unauthenticated_is_false() {
        let usecase = usecase_with_store(Arc::new(MockTokenStore::new()));
        assert!(!usecase.has_permission(Permission::View).await);
    }
}
