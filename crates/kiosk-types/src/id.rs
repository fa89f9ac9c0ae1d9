//! Identifier types.
//!
//! User identities are UUID-based. Role identifiers are the plain strings
//! stored by the settings backend (`"root"`, `"admin"`, `"pizza-station"`).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use uuid::{uuid, Uuid};

/// Namespace UUID for deterministic UUID v5 user identifiers.
const KIOSK_USER_NAMESPACE: Uuid = uuid!("3f0c7a52-8d4e-4b6f-9a1e-5c2d7e94b031");

/// Identifier of an authenticated user.
///
/// # UUID Strategy
///
/// - **Known usernames**: UUID v5 derived from the username, so the same
///   account maps to the same id across processes
/// - **Anonymous / ad-hoc**: UUID v4 (random)
///
/// # Example
///
/// ```
/// use kiosk_types::UserId;
///
/// let a = UserId::from_username("cashier-1");
/// let b = UserId::from_username("cashier-1");
/// assert_eq!(a, b);
///
/// assert_ne!(UserId::new(), UserId::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new [`UserId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic [`UserId`] from a username.
    #[must_use]
    pub fn from_username(username: &str) -> Self {
        Self(Uuid::new_v5(&KIOSK_USER_NAMESPACE, username.as_bytes()))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Identifier of a role in the role registry.
///
/// Role ids are compared by exact string equality. No case folding or
/// trimming happens here; the registry stores ids verbatim.
///
/// # Example
///
/// ```
/// use kiosk_types::RoleId;
///
/// let role: RoleId = "admin".into();
/// assert_eq!(role, RoleId::new("admin"));
/// assert_eq!(role.to_string(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Creates a role id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RoleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RoleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
