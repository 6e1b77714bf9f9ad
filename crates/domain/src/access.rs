use atelier_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::security::{Permission, Role};

/// The authenticated subject attached to a request.
///
/// `uid` is the opaque identifier issued by the identity provider; `role`
/// always comes from the stored profile, never from client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    uid: String,
    role: Role,
}

impl Identity {
    /// Creates an identity from a verified subject and its stored role.
    #[must_use]
    pub fn new(uid: impl Into<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            role,
        }
    }

    /// Returns the opaque subject identifier.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the role resolved from the stored profile.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// What a caller must hold for a privileged action or view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequirement {
    /// A single atomic permission.
    Permission(Permission),
    /// Exact membership in one of the listed roles.
    AnyRole(Vec<Role>),
}

/// Outcome of an access check. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The identity satisfies the requirement.
    Allow,
    /// The identity is absent or insufficient.
    Deny,
}

/// Decides whether `identity` satisfies `requirement`.
///
/// Pure and synchronous: no I/O, no failure mode. An unauthenticated caller
/// is always denied. Role matching is exact membership, with no hierarchy
/// between roles or permissions.
#[must_use]
pub fn check(identity: Option<&Identity>, requirement: &AccessRequirement) -> AccessDecision {
    let Some(identity) = identity else {
        return AccessDecision::Deny;
    };

    let allowed = match requirement {
        AccessRequirement::Permission(permission) => identity.role().grants(*permission),
        AccessRequirement::AnyRole(roles) => roles.contains(&identity.role()),
    };

    if allowed {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny
    }
}

/// Converts a permission denial into the uniform authorization error.
pub fn require(identity: &Identity, permission: Permission) -> AppResult<()> {
    match check(
        Some(identity),
        &AccessRequirement::Permission(permission),
    ) {
        AccessDecision::Allow => Ok(()),
        AccessDecision::Deny => Err(AppError::Forbidden(format!(
            "role '{}' is missing permission '{}'",
            identity.role().as_str(),
            permission.as_str()
        ))),
    }
}
