//! Roles: named permission sets.

use crate::error::RoleError;
use crate::permission::{Permission, PermissionCatalog};
use kiosk_types::RoleId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A role as stored by the settings backend.
///
/// Roles are reference data: created and edited by the admin console,
/// read-only to the authorizer.
///
/// # Example
///
/// ```
/// use kiosk_auth::Role;
///
/// let role = Role::new("pizza-station", "Pizza station")
///     .with_permission("/admin/kds/pizza");
///
/// assert!(role.grants("/admin/kds/pizza"));
/// assert!(!role.grants("/admin/kds/pasta"));
/// assert!(!role.has_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique id, referenced by sessions.
    pub id: RoleId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Role {
    /// Creates a role with no permissions.
    #[must_use]
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Adds a permission (builder style).
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Adds several permissions (builder style).
    #[must_use]
    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if the exact permission string is granted.
    #[must_use]
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Returns `true` if the role holds the universal wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.permissions.iter().any(Permission::is_wildcard)
    }

    /// Returns `true` if any granted permission sits at or below `root`.
    #[must_use]
    pub fn grants_any_under(&self, root: &str) -> bool {
        self.permissions.iter().any(|p| p.is_under(root))
    }

    /// Permissions that are neither the wildcard nor catalog entries.
    ///
    /// Such permissions load fine but stay dead unless a route of that exact name exists.
    #[must_use]
    pub fn unknown_permissions(&self, catalog: &PermissionCatalog) -> Vec<&Permission> {
        self.permissions
            .iter()
            .filter(|p| !catalog.is_recognized(p))
            .collect()
    }

    /// Checks the role before it is written to the registry.
    ///
    /// # Errors
    ///
    /// - [`RoleError::EmptyId`] if the id is blank
    /// - [`RoleError::UnknownPermission`] for the first unrecognized permission
    pub fn validate(&self, catalog: &PermissionCatalog) -> Result<(), RoleError> {
        if self.id.is_blank() {
            return Err(RoleError::EmptyId);
        }

        if let Some(unknown) = self.unknown_permissions(catalog).first() {
            return Err(RoleError::UnknownPermission {
                role: self.id.clone(),
                permission: unknown.to_string(),
            });
        }

        Ok(())
    }
}

/// Finds the role with the given id.
#[must_use]
pub fn find_role<'a>(roles: &'a [Role], id: &RoleId) -> Option<&'a Role> {
    roles.iter().find(|r| &r.id == id)
}

/// Validates a whole role set: every role individually, then id uniqueness.
///
/// # Errors
///
/// Returns the first [`RoleError`] found, in registry order.
pub fn validate_roles(roles: &[Role], catalog: &PermissionCatalog) -> Result<(), RoleError> {
    let mut seen = HashSet::with_capacity(roles.len());
    for role in roles {
        role.validate(catalog)?;
        if !seen.insert(&role.id) {
            return Err(RoleError::DuplicateRole(role.id.clone()));
        }
    }
    Ok(())
}

/// Ids that appear more than once, one entry per extra occurrence.
///
/// Lookups use the first role with a given id, so the later ones are shadowed.
#[must_use]
pub fn duplicate_role_ids(roles: &[Role]) -> Vec<&RoleId> {
    let mut seen = HashSet::with_capacity(roles.len());
    roles
        .iter()
        .map(|r| &r.id)
        .filter(|id| !seen.insert(*id))
        .collect()
}
