//! Fixture auth service.
//!
//! Validates credentials against the seeded accounts and issues a signed-
//! looking (but unverified) session token carrying the user's claims.

use async_trait::async_trait;
use chrono::Utc;
use pumpmaster_core::auth::token::{self, TokenClaims};
use pumpmaster_core::auth::{AuthService, AuthSuccess, LoginCredentials, User};
use pumpmaster_core::error::{PumpMasterError, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::fixture::users::{FixtureUser, seeded_users};

const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Auth service backed by the seeded accounts.
pub struct FixtureAuthService {
    users: Vec<FixtureUser>,
    latency: bool,
}

impl FixtureAuthService {
    /// Creates the service. `latency` adds a uniform-random delay to each
    /// call to mimic a network round trip.
    pub fn new(latency: bool) -> Self {
        Self {
            users: seeded_users(),
            latency,
        }
    }

    async fn simulate_delay(&self) {
        if !self.latency {
            return;
        }
        // 200-1000ms, drawn before the await so the rng is not held across it
        let millis = rand::thread_rng().gen_range(200..=1000);
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
    }

    fn issue_claims(user: &User) -> TokenClaims {
        let now = Utc::now().timestamp();
        TokenClaims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            name: Some(user.name.clone()),
            permissions: user.permissions.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }
}

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSuccess> {
        self.simulate_delay().await;

        // Email matching is case-insensitive, the password is exact
        let matched = self.users.iter().find(|entry| {
            entry.user.email.eq_ignore_ascii_case(&credentials.email)
                && entry.password == credentials.password
        });

        let Some(entry) = matched else {
            debug!(
                "[FixtureAuthService] Rejected login for {}",
                credentials.email
            );
            return Err(PumpMasterError::InvalidCredentials);
        };

        let claims = Self::issue_claims(&entry.user);
        let token = token::encode(&claims)?;
        info!("[FixtureAuthService] Issued token for {}", entry.user.email);

        Ok(AuthSuccess {
            user: entry.user.clone(),
            token,
            refresh_token: Some(format!("refresh-{}", entry.user.id)),
            expires_at: claims.expires_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpmaster_core::auth::{Permission, Role};

    fn service() -> FixtureAuthService {
        FixtureAuthService::new(false)
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_admin_login_issues_decodable_token() {
        let success = service()
            .login(&credentials("admin@informag.com", "admin123"))
            .await
            .expect("Should log in");

        assert_eq!(success.user.role, Role::Admin);
        assert!(success.refresh_token.is_some());

        let claims = token::decode(&success.token).expect("Should decode issued token");
        assert_eq!(claims.user_id, "user-admin-001");
        assert!(claims.to_session().has_permission(Permission::Manage));
        assert!(success.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_email_match_ignores_case() {
        let success = service()
            .login(&credentials("Admin@InformAG.com", "admin123"))
            .await
            .expect("Should log in");
        assert_eq!(success.user.email, "admin@informag.com");
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let err = service()
            .login(&credentials("admin@informag.com", "nope"))
            .await
            .expect_err("Should reject");
        assert!(err.is_invalid_credentials());
    }

    #[tokio::test]
    async fn test_unknown_email_is_rejected() {
        let err = service()
            .login(&credentials("ghost@informag.com", "admin123"))
            .await
            .expect_err("Should reject");
        assert!(err.is_invalid_credentials());
    }

    #[tokio::test]
    async fn test_viewer_cannot_delete() {
        let success = service()
            .login(&credentials("viewer@informag.com", "viewer123"))
            .await
            .expect("Should log in");

        let claims = token::decode(&success.token).expect("Should decode issued token");
        let session = claims.to_session();
        assert!(session.has_permission(Permission::View));
        assert!(!session.has_permission(Permission::Delete));
    }
}
