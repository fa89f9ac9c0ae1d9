//! Authenticated session.

use kiosk_types::{RoleId, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in user, as reported by the auth collaborator.
///
/// The authorizer only ever reads [`role`](Self::role). A missing role is
/// legal (freshly created accounts) and never matches any registry entry.
///
/// # Why No Default?
///
/// A session always belongs to a user. "No session" is expressed as
/// `Option<&Session>::None` at the call site, never as an empty session.
///
/// # Example
///
/// ```
/// use kiosk_auth::Session;
///
/// let session = Session::new("maria", Some("pizza-station"));
/// assert!(session.has_role("pizza-station"));
/// assert_eq!(session.username(), "maria");
///
/// let unassigned = Session::new("new-hire", None::<&str>);
/// assert!(unassigned.role().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    username: String,
    role: Option<RoleId>,
}

impl Session {
    /// Creates a session whose user id is derived from the username.
    #[must_use]
    pub fn new<R: Into<RoleId>>(username: impl Into<String>, role: Option<R>) -> Self {
        let username = username.into();
        Self {
            user_id: UserId::from_username(&username),
            username,
            role: role.map(Into::into),
        }
    }

    /// Creates a session with an explicit user id.
    #[must_use]
    pub fn with_user_id(
        user_id: UserId,
        username: impl Into<String>,
        role: Option<RoleId>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Returns the user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the assigned role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&RoleId> {
        self.role.as_ref()
    }

    /// Returns `true` if the assigned role equals `role` exactly.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_ref().is_some_and(|r| r.as_str() == role)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.role {
            Some(role) => write!(f, "{}@{}", self.username, role),
            None => write!(f, "{}@<no role>", self.username),
        }
    }
}
