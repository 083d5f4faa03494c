//! Seeded user accounts.

use pumpmaster_core::auth::{Role, User};

/// A seeded account together with its plaintext password.
#[derive(Debug, Clone)]
pub struct FixtureUser {
    pub user: User,
    pub password: &'static str,
}

fn permission_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|p| p.to_string()).collect()
}

/// Returns the three seeded accounts, one per role.
pub fn seeded_users() -> Vec<FixtureUser> {
    vec![
        FixtureUser {
            user: User {
                id: "user-admin-001".to_string(),
                email: "admin@informag.com".to_string(),
                name: "Admin User".to_string(),
                role: Role::Admin,
                permissions: permission_names(&["view", "edit", "delete", "manage"]),
            },
            password: "admin123",
        },
        FixtureUser {
            user: User {
                id: "user-operator-001".to_string(),
                email: "operator@informag.com".to_string(),
                name: "Operator User".to_string(),
                role: Role::Operator,
                permissions: permission_names(&["view", "edit"]),
            },
            password: "operator123",
        },
        FixtureUser {
            user: User {
                id: "user-viewer-001".to_string(),
                email: "viewer@informag.com".to_string(),
                name: "Viewer User".to_string(),
                role: Role::Viewer,
                permissions: permission_names(&["view"]),
            },
            password: "viewer123",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_account_per_role() {
        let users = seeded_users();
        assert_eq!(users.len(), 3);

        let roles: Vec<Role> = users.iter().map(|u| u.user.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Operator, Role::Viewer]);
    }

    #[test]
    fn test_only_admin_can_manage() {
        let users = seeded_users();
        for entry in &users {
            let can_manage = entry.user.permissions.iter().any(|p| p == "manage");
            assert_eq!(can_manage, entry.user.role == Role::Admin);
        }
    }
}
