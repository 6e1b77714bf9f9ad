use std::str::FromStr;

use atelier_core::AppError;
use serde::{Deserialize, Serialize};

/// Roles assignable to a user profile.
///
/// The set is closed: capabilities derive from the permission table below,
/// and extending it requires a new variant plus a new table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative control over the workspace.
    Admin,
    /// Runs projects: creates, reviews, and approves orders.
    ProjectManager,
    /// Works on assigned orders.
    Designer,
    /// External customer placing and following orders.
    Client,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::Designer => "designer",
            Self::Client => "client",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Admin,
            Role::ProjectManager,
            Role::Designer,
            Role::Client,
        ];

        ALL
    }

    /// Returns the permission set granted to this role.
    ///
    /// The match is exhaustive over the closed role enumeration: adding a
    /// role without extending the table is a compile error, never a silent
    /// empty or full grant.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Admin => ADMIN_PERMISSIONS,
            Self::ProjectManager => PROJECT_MANAGER_PERMISSIONS,
            Self::Designer => DESIGNER_PERMISSIONS,
            Self::Client => CLIENT_PERMISSIONS,
        }
    }

    /// Returns whether the role grants the permission.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "project_manager" => Ok(Self::ProjectManager),
            "designer" => Ok(Self::Designer),
            "client" => Ok(Self::Client),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Permissions enforced by application policy checks.
///
/// Permissions are atomic: none implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows placing a new order.
    CreateOrder,
    /// Allows editing order content and checklist items.
    EditOrder,
    /// Allows deleting an order.
    DeleteOrder,
    /// Allows reading orders.
    ViewOrders,
    /// Allows reading and administering user profiles and roles.
    ManageUsers,
    /// Allows approving orders under review.
    ApproveOrders,
    /// Allows assigning checklist items to users.
    AssignTasks,
    /// Allows reading the order analytics summary.
    ViewAnalytics,
    /// Allows reading and changing workspace settings.
    ManageSettings,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOrder => "create_order",
            Self::EditOrder => "edit_order",
            Self::DeleteOrder => "delete_order",
            Self::ViewOrders => "view_orders",
            Self::ManageUsers => "manage_users",
            Self::ApproveOrders => "approve_orders",
            Self::AssignTasks => "assign_tasks",
            Self::ViewAnalytics => "view_analytics",
            Self::ManageSettings => "manage_settings",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::CreateOrder,
            Permission::EditOrder,
            Permission::DeleteOrder,
            Permission::ViewOrders,
            Permission::ManageUsers,
            Permission::ApproveOrders,
            Permission::AssignTasks,
            Permission::ViewAnalytics,
            Permission::ManageSettings,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create_order" => Ok(Self::CreateOrder),
            "edit_order" => Ok(Self::EditOrder),
            "delete_order" => Ok(Self::DeleteOrder),
            "view_orders" => Ok(Self::ViewOrders),
            "manage_users" => Ok(Self::ManageUsers),
            "approve_orders" => Ok(Self::ApproveOrders),
            "assign_tasks" => Ok(Self::AssignTasks),
            "view_analytics" => Ok(Self::ViewAnalytics),
            "manage_settings" => Ok(Self::ManageSettings),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::CreateOrder,
    Permission::EditOrder,
    Permission::DeleteOrder,
    Permission::ViewOrders,
    Permission::ManageUsers,
    Permission::ApproveOrders,
    Permission::AssignTasks,
    Permission::ViewAnalytics,
    Permission::ManageSettings,
];

const PROJECT_MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::CreateOrder,
    Permission::EditOrder,
    Permission::ViewOrders,
    Permission::ApproveOrders,
    Permission::AssignTasks,
    Permission::ViewAnalytics,
];

const DESIGNER_PERMISSIONS: &[Permission] = &[Permission::ViewOrders, Permission::EditOrder];

const CLIENT_PERMISSIONS: &[Permission] = &[Permission::CreateOrder, Permission::ViewOrders];

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{Permission, Role};

    #[test]
    fn every_role_has_a_non_empty_permission_set() {
        for role in Role::all() {
            assert!(
                !role.permissions().is_empty(),
                "role '{}' has no permissions",
                role.as_str()
            );
        }
    }

    #[test]
    fn permission_lookup_is_deterministic() {
        for role in Role::all() {
            assert_eq!(role.permissions(), role.permissions());
        }
    }

    #[test]
    fn manage_users_is_admin_only() {
        assert!(Role::Admin.grants(Permission::ManageUsers));
        assert!(!Role::ProjectManager.grants(Permission::ManageUsers));
        assert!(!Role::Designer.grants(Permission::ManageUsers));
        assert!(!Role::Client.grants(Permission::ManageUsers));
    }

    #[test]
    fn project_manager_permissions_are_a_subset_of_admin() {
        for permission in Role::ProjectManager.permissions() {
            assert!(
                Role::Admin.grants(*permission),
                "admin is missing '{}'",
                permission.as_str()
            );
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("intern").is_err());
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(Permission::from_str("launch_rockets").is_err());
    }

    proptest! {
        #[test]
        fn role_storage_roundtrip(role in proptest::sample::select(Role::all())) {
            prop_assert_eq!(Role::from_str(role.as_str()).ok(), Some(role));
        }

        #[test]
        fn permission_storage_roundtrip(
            permission in proptest::sample::select(Permission::all())
        ) {
            prop_assert_eq!(Permission::from_str(permission.as_str()).ok(), Some(permission));
        }
    }
}
