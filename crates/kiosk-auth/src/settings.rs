//! Authorization settings: the well-known role ids and routes.

use crate::permission::KDS_SECTION_ROOT;
use kiosk_types::RoleId;
use serde::{Deserialize, Serialize};

/// Role ids and routes the authorizers treat specially.
///
/// The defaults match the deployed console. The runtime config can
/// override every field (see `[auth]` and `[kds]` in `config.toml`).
///
/// # Example
///
/// ```
/// use kiosk_auth::AuthSettings;
///
/// let settings = AuthSettings::default();
/// assert_eq!(settings.superuser_role.as_str(), "root");
/// assert_eq!(settings.sign_in_route, "/login");
/// assert!(settings.is_full_access_role("kds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Role that bypasses every check, even when the registry is unavailable.
    pub superuser_role: RoleId,
    /// The only role admitted to the marketing section.
    pub marketing_role: RoleId,
    /// Root of the kitchen display section (shared KDS chrome).
    pub kds_section_root: String,
    /// Where denied admin navigations are sent.
    pub sign_in_route: String,
    /// Where signed-in users with the wrong role are sent by the marketing guard.
    pub storefront_route: String,
    /// Roles that see every KDS station.
    pub full_access_roles: Vec<RoleId>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            superuser_role: RoleId::new("root"),
            marketing_role: RoleId::new("marketing"),
            kds_section_root: KDS_SECTION_ROOT.to_string(),
            sign_in_route: "/login".to_string(),
            storefront_route: "/".to_string(),
            full_access_roles: vec![RoleId::new("root"), RoleId::new("admin"), RoleId::new("kds")],
        }
    }
}

impl AuthSettings {
    /// Returns `true` if `role` is in [`full_access_roles`](Self::full_access_roles).
    #[must_use]
    pub fn is_full_access_role(&self, role: &str) -> bool {
        self.full_access_roles.iter().any(|r| r.as_str() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = AuthSettings::default();
        assert_eq!(s.marketing_role, "marketing");
        assert_eq!(s.kds_section_root, "/admin/kds");
        assert_eq!(s.storefront_route, "/");
        assert!(s.is_full_access_role("root"));
        assert!(s.is_full_access_role("admin"));
        assert!(!s.is_full_access_role("pizza-station"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s: AuthSettings = toml::from_str(r#"sign_in_route = "/staff/sign-in""#)
            .expect("parse settings");
        assert_eq!(s.sign_in_route, "/staff/sign-in");
        assert_eq!(s.superuser_role, "root");
    }
}
