//! Authorization decisions.
//!
//! A decision is derived, never stored: it is recomputed for every
//! navigation and must not be cached across route changes.

use serde::{Deserialize, Serialize};

/// Why a navigation was allowed or denied.
///
/// | Reason | Allowed | Produced by |
/// |--------|---------|-------------|
/// | `Unauthenticated` | no | both guards |
/// | `Superuser` | yes | admin |
/// | `RolesUnavailable` | no | admin |
/// | `RoleNotFound` | no | admin |
/// | `Wildcard` | yes | admin |
/// | `DirectMatch` | yes | admin |
/// | `PrefixMatch` | yes | admin |
/// | `NoPermission` | no | admin |
/// | `RoleMatch` | yes | marketing |
/// | `RoleMismatch` | no | marketing |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionReason {
    /// No session.
    Unauthenticated,
    /// Superuser bypass.
    Superuser,
    /// Registry finished loading with no roles.
    RolesUnavailable,
    /// The session's role id is not in the registry.
    RoleNotFound,
    /// The role holds the wildcard permission.
    Wildcard,
    /// The role grants the exact path.
    DirectMatch,
    /// Shared KDS chrome: the path and one of the role's permissions are both
    /// under the section root.
    PrefixMatch,
    /// Nothing matched.
    NoPermission,
    /// Single-role guard: role matches.
    RoleMatch,
    /// Single-role guard: signed in with a different role.
    RoleMismatch,
}

impl DecisionReason {
    /// Stable UPPER_SNAKE_CASE code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Superuser => "SUPERUSER",
            Self::RolesUnavailable => "ROLES_UNAVAILABLE",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::Wildcard => "WILDCARD",
            Self::DirectMatch => "DIRECT_MATCH",
            Self::PrefixMatch => "PREFIX_MATCH",
            Self::NoPermission => "NO_PERMISSION",
            Self::RoleMatch => "ROLE_MATCH",
            Self::RoleMismatch => "ROLE_MISMATCH",
        }
    }

    /// Returns `true` for reasons that grant access.
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(
            self,
            Self::Superuser
                | Self::Wildcard
                | Self::DirectMatch
                | Self::PrefixMatch
                | Self::RoleMatch
        )
    }

    /// Returns `true` for denials that point at configuration drift
    /// rather than ordinary unauthorized access.
    #[must_use]
    pub fn is_misconfiguration(self) -> bool {
        matches!(self, Self::RolesUnavailable | Self::RoleNotFound)
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of one authorization check.
///
/// `allowed` is always consistent with `reason`; construct through
/// [`from_reason`](Self::from_reason).
///
/// # Example
///
/// ```
/// use kiosk_auth::{AuthorizationDecision, DecisionReason};
///
/// let d = AuthorizationDecision::from_reason(DecisionReason::PrefixMatch);
/// assert!(d.allowed);
/// assert_eq!(d.status_str(), "allowed");
///
/// let d = AuthorizationDecision::from_reason(DecisionReason::RoleNotFound);
/// assert!(d.is_denied());
/// assert_eq!(d.to_string(), "denied (ROLE_NOT_FOUND)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    /// Whether the navigation may proceed.
    pub allowed: bool,
    /// Which rule decided.
    pub reason: DecisionReason,
}

impl AuthorizationDecision {
    /// Builds the decision implied by `reason`.
    #[must_use]
    pub fn from_reason(reason: DecisionReason) -> Self {
        Self {
            allowed: reason.is_allow(),
            reason,
        }
    }

    /// Returns `true` if the navigation was denied.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Returns the status as a string ("allowed", "denied").
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        if self.allowed {
            "allowed"
        } else {
            "denied"
        }
    }
}

impl From<DecisionReason> for AuthorizationDecision {
    fn from(reason: DecisionReason) -> Self {
        Self::from_reason(reason)
    }
}

impl std::fmt::Display for AuthorizationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.status_str(), self.reason)
    }
}
