//! Role validation errors.

use kiosk_types::{ErrorCode, RoleId};
use thiserror::Error;

/// A role that cannot be written to the registry.
///
/// Only produced on write paths ([`Role::validate`](crate::Role::validate),
/// [`validate_roles`](crate::validate_roles)). Read paths tolerate malformed
/// roles and never fail.
///
/// # Example
///
/// ```
/// use kiosk_auth::RoleError;
/// use kiosk_types::{ErrorCode, RoleId};
///
/// let err = RoleError::UnknownPermission {
///     role: RoleId::new("grill-station"),
///     permission: "/admin/kds/grill".to_string(),
/// };
///
/// assert!(err.to_string().contains("/admin/kds/grill"));
/// assert_eq!(err.code(), "ROLE_UNKNOWN_PERMISSION");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// The role id is empty or whitespace.
    #[error("role id must not be empty")]
    EmptyId,

    /// The role grants a permission that is neither the wildcard nor in the catalog.
    #[error("role '{role}' grants unknown permission '{permission}'")]
    UnknownPermission {
        /// Offending role.
        role: RoleId,
        /// Permission string not found in the catalog.
        permission: String,
    },

    /// Two roles share an id.
    #[error("duplicate role id '{0}'")]
    DuplicateRole(RoleId),
}

impl ErrorCode for RoleError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "ROLE_EMPTY_ID",
            Self::UnknownPermission { .. } => "ROLE_UNKNOWN_PERMISSION",
            Self::DuplicateRole(_) => "ROLE_DUPLICATE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // All of these are fixed by editing the role and saving again.
        true
    }
}
