//! Permission System
//!
//! Maps each account role to the actions it may perform. Browsing is public
//! and needs no permission; mutations are gated here before any ownership
//! check.

use crate::{ApplicationError, ApplicationResult};
use jobboard_core::{AccountKind, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Specific permissions granted to a role
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Submit applications to listings
    ApplyToListings,
    /// Create, edit and remove own listings
    ManageListings,
    /// Review applications to own listings
    ReviewApplications,
    /// Receive and manage notifications
    ReceiveNotifications,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::ApplyToListings => write!(f, "apply_to_listings"),
            Permission::ManageListings => write!(f, "manage_listings"),
            Permission::ReviewApplications => write!(f, "review_applications"),
            Permission::ReceiveNotifications => write!(f, "receive_notifications"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apply_to_listings" => Ok(Permission::ApplyToListings),
            "manage_listings" => Ok(Permission::ManageListings),
            "review_applications" => Ok(Permission::ReviewApplications),
            "receive_notifications" => Ok(Permission::ReceiveNotifications),
            _ => Err(format!("Unknown permission: {}", s)),
        }
    }
}

/// Get default permissions for an account kind
pub fn default_permissions(kind: AccountKind) -> HashSet<Permission> {
    use Permission::*;

    match kind {
        AccountKind::Candidate => [ApplyToListings, ReceiveNotifications]
            .into_iter()
            .collect(),
        AccountKind::Recruiter => [ManageListings, ReviewApplications, ReceiveNotifications]
            .into_iter()
            .collect(),
    }
}

pub fn has_permission(session: &Session, permission: Permission) -> bool {
    default_permissions(session.kind()).contains(&permission)
}

/// Fail with `Unauthorized` unless the actor's role grants `permission`
pub fn require(actor: &Session, permission: Permission) -> ApplicationResult<()> {
    if has_permission(actor, permission) {
        Ok(())
    } else {
        Err(ApplicationError::unauthorized(format!(
            "{} accounts lack the {} permission",
            actor.kind(),
            permission
        )))
    }
}

/// Resolve the active session, failing with `Unauthorized` when signed out
pub fn require_session(current: Option<&Session>) -> ApplicationResult<&Session> {
    current.ok_or_else(|| ApplicationError::unauthorized("sign in required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::Role;

    fn session(role: Role) -> Session {
        Session {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            display_name: "U1".to_string(),
            role,
        }
    }

    #[test]
    fn test_role_permissions() {
        let candidate = session(Role::Candidate);
        let recruiter = session(Role::Recruiter {
            organization: "TechCorp".to_string(),
        });

        assert!(has_permission(&candidate, Permission::ApplyToListings));
        assert!(!has_permission(&candidate, Permission::ManageListings));
        assert!(has_permission(&recruiter, Permission::ManageListings));
        assert!(!has_permission(&recruiter, Permission::ApplyToListings));
        assert!(has_permission(&candidate, Permission::ReceiveNotifications));
        assert!(has_permission(&recruiter, Permission::ReceiveNotifications));
    }

    #[test]
    fn test_require() {
        let candidate = session(Role::Candidate);
        let err = require(&candidate, Permission::ManageListings).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(require_session(None).unwrap_err().is_unauthorized());
        assert_eq!(require_session(Some(&candidate)).unwrap().id, "u1");
    }

    #[test]
    fn test_permission_parsing() {
        assert_eq!(
            "manage_listings".parse::<Permission>().unwrap(),
            Permission::ManageListings
        );
        assert!("admin".parse::<Permission>().is_err());
    }
}
