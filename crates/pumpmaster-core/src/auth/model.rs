//! Authentication domain model.
//!
//! This module contains the user identity, the authenticated session, and
//! the request/response payloads exchanged with the auth collaborator.

use crate::error::PumpMasterError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A user's role within the console.
///
/// Roles are closed; the open-ended part of authorization is the flat
/// permission set carried next to the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

impl Role {
    /// The wire form of the role, as carried in tokens and fixture data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PumpMasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            "viewer" => Ok(Role::Viewer),
            other => Err(PumpMasterError::internal(format!("Unknown role: {other}"))),
        }
    }
}

/// A named capability a session may hold.
///
/// The known grants are `view`, `edit`, `delete` and `manage`; sessions
/// store grants as plain strings so tokens may carry values this enum does
/// not know about yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    View,
    Edit,
    Delete,
    Manage,
}

impl Permission {
    /// The wire form of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Edit => "edit",
            Permission::Delete => "delete",
            Permission::Manage => "manage",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PumpMasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Permission::View),
            "edit" => Ok(Permission::Edit),
            "delete" => Ok(Permission::Delete),
            "manage" => Ok(Permission::Manage),
            other => Err(PumpMasterError::internal(format!(
                "Unknown permission: {other}"
            ))),
        }
    }
}

/// A user identity as returned by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login email address
    pub email: String,
    /// Human-readable display name
    pub name: String,
    /// The user's role
    pub role: Role,
    /// Flat permission grants
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// The authenticated identity held for the process lifetime.
///
/// A session is either fully populated or entirely absent; no partial
/// session is ever observable. It is created on successful login or on
/// successful startup restoration, and destroyed on logout or on detecting
/// an invalid persisted token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique user identifier
    pub user_id: String,
    /// Login email address
    pub email: String,
    /// Display name; derived from the email local-part when the token
    /// carries no name claim
    pub name: String,
    /// The user's role
    pub role: Role,
    /// Flat permission grants
    pub permissions: BTreeSet<String>,
    /// When the backing token expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session from an auth-collaborator user payload.
    pub fn from_user(user: &User, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            permissions: user.permissions.iter().cloned().collect(),
            expires_at,
        }
    }

    /// Checks whether this session holds the given permission.
    ///
    /// This is the permission evaluator for the whole console: a plain
    /// membership test against the grant set, no allocation.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission.as_str())
    }
}

/// Login request payload for the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Successful login response from the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSuccess {
    /// The authenticated user
    pub user: User,
    /// The issued session token (three-segment opaque string)
    pub token: String,
    /// Optional refresh token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When the issued token expires
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(permissions: &[&str]) -> Session {
        Session {
            user_id: "user-test-001".to_string(),
            email: "test@informag.com".to_string(),
            name: "Test".to_string(),
            role: Role::Operator,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_permission() {
        let session = session_with(&["view", "edit"]);
        assert!(session.has_permission(Permission::View));
        assert!(session.has_permission(Permission::Edit));
        assert!(!session.has_permission(Permission::Delete));
        assert!(!session.has_permission(Permission::Manage));
    }

    #[test]
    fn test_has_permission_empty_set() {
        let session = session_with(&[]);
        assert!(!session.has_permission(Permission::View));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Operator, Role::Viewer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_wire_form() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let back: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(back, Role::Viewer);
    }

    #[test]
    fn test_session_from_user_collects_permissions() {
        let user = User {
            id: "user-admin-001".to_string(),
            email: "admin@informag.com".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
            permissions: vec!["view".to_string(), "edit".to_string(), "view".to_string()],
        };
        let session = Session::from_user(&user, Utc::now());
        // Duplicates collapse in the set
        assert_eq!(session.permissions.len(), 2);
        assert!(session.has_permission(Permission::View));
    }
}
