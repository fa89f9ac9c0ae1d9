//! Permission strings and the static permission catalog.
//!
//! A [`Permission`] is an opaque string. In practice it is either a literal
//! admin route path (`/admin/menu`) or the universal [`WILDCARD`].
//!
//! The [`PermissionCatalog`] lists every permission the admin role editor
//! offers. It is pure data: the authorizer never consults it, and roles
//! holding strings outside it are tolerated on read. Such strings are
//! compared literally like any other, so they stay dead unless a route with
//! that exact name exists. Writes go through [`Role::validate`](crate::Role::validate).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// The universal wildcard: every admin-section route, present and future.
pub const WILDCARD: &str = "*";

/// Root of the kitchen display section.
///
/// Station views live directly beneath it (`/admin/kds/pizza`).
pub const KDS_SECTION_ROOT: &str = "/admin/kds";

/// A single permission string.
///
/// # Example
///
/// ```
/// use kiosk_auth::Permission;
///
/// let p = Permission::new("/admin/menu");
/// assert_eq!(p.as_str(), "/admin/menu");
/// assert!(!p.is_wildcard());
/// assert!(Permission::wildcard().is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Creates a permission from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the universal wildcard permission.
    #[must_use]
    pub fn wildcard() -> Self {
        Self(WILDCARD.to_string())
    }

    /// Returns the permission as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the universal wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }

    /// Returns `true` if this permission begins with `root`.
    ///
    /// Plain string prefix: `/admin/kds-history` is under `/admin/kds` too.
    #[must_use]
    pub fn is_under(&self, root: &str) -> bool {
        is_under(&self.0, root)
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if `path` begins with `root`.
pub(crate) fn is_under(path: &str, root: &str) -> bool {
    path.starts_with(root)
}

/// One catalog entry, as shown in the admin role editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    /// Permission string stored in roles.
    pub id: &'static str,
    /// Short display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const ENTRIES: &[PermissionEntry] = &[
    PermissionEntry {
        id: WILDCARD,
        name: "Full access",
        description: "Every admin route, including routes added later",
    },
    PermissionEntry {
        id: "/admin",
        name: "Dashboard",
        description: "Admin landing page and daily summary",
    },
    PermissionEntry {
        id: "/admin/orders",
        name: "Orders",
        description: "Browse, search and void orders",
    },
    PermissionEntry {
        id: "/admin/cashier",
        name: "Cashier",
        description: "Cashier dashboard: take payments and settle open tickets",
    },
    PermissionEntry {
        id: "/admin/menu",
        name: "Menu",
        description: "Edit items, categories, prices and availability",
    },
    PermissionEntry {
        id: "/admin/settings",
        name: "Settings",
        description: "Store hours, receipt options and kiosk behaviour",
    },
    PermissionEntry {
        id: "/admin/roles",
        name: "Roles",
        description: "Create roles and assign permissions",
    },
    PermissionEntry {
        id: "/admin/reports",
        name: "Reports",
        description: "Sales and item reports",
    },
    PermissionEntry {
        id: "/admin/logs",
        name: "Logs",
        description: "Operational audit log",
    },
    PermissionEntry {
        id: "/admin/ratings",
        name: "Ratings",
        description: "Customer ratings and feedback",
    },
    PermissionEntry {
        id: KDS_SECTION_ROOT,
        name: "Kitchen display",
        description: "All kitchen display stations",
    },
    PermissionEntry {
        id: "/admin/kds/pizza",
        name: "Pizza station",
        description: "Kitchen display for the pizza station",
    },
    PermissionEntry {
        id: "/admin/kds/pasta",
        name: "Pasta station",
        description: "Kitchen display for the pasta station",
    },
    PermissionEntry {
        id: "/admin/kds/fried",
        name: "Fried station",
        description: "Kitchen display for the fryer station",
    },
    PermissionEntry {
        id: "/admin/kds/beverage",
        name: "Beverage station",
        description: "Kitchen display for the drinks station",
    },
];

/// The fixed catalog of recognized permissions.
///
/// # Example
///
/// ```
/// use kiosk_auth::{PermissionCatalog, WILDCARD};
///
/// let catalog = PermissionCatalog::standard();
/// assert_eq!(catalog.list_all()[0].id, WILDCARD);
/// assert!(catalog.contains("/admin/menu"));
/// assert!(!catalog.contains("/admin/unknown"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PermissionCatalog {
    entries: &'static [PermissionEntry],
}

impl PermissionCatalog {
    /// Returns the built-in catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self { entries: ENTRIES }
    }

    /// Lists every entry in display order.
    #[must_use]
    pub fn list_all(&self) -> &'static [PermissionEntry] {
        self.entries
    }

    /// Returns the entry with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static PermissionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns `true` if `id` is a catalog entry.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns `true` if the permission is the wildcard or a catalog entry.
    #[must_use]
    pub fn is_recognized(&self, permission: &Permission) -> bool {
        permission.is_wildcard() || self.contains(permission.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = PermissionCatalog::standard();
        let ids: HashSet<_> = catalog.list_all().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn catalog_starts_with_wildcard() {
        let catalog = PermissionCatalog::standard();
        assert_eq!(catalog.list_all()[0].id, WILDCARD);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn every_station_has_catalog_entry() {
        let catalog = PermissionCatalog::standard();
        for link in crate::station::STATION_LINKS {
            assert!(catalog.contains(link.href), "missing {}", link.href);
        }
    }

    #[test]
    fn is_recognized() {
        let catalog = PermissionCatalog::standard();
        assert!(catalog.is_recognized(&Permission::wildcard()));
        assert!(catalog.is_recognized(&Permission::new("/admin/kds/pizza")));
        assert!(!catalog.is_recognized(&Permission::new("/admin/kds/sushi")));
        assert!(!catalog.is_recognized(&Permission::new("admin")));
    }

    #[test]
    fn get_returns_labels() {
        let catalog = PermissionCatalog::standard();
        let entry = catalog.get("/admin/menu").expect("menu entry");
        assert_eq!(entry.name, "Menu");
        assert!(catalog.get("/nope").is_none());
    }

    #[test]
    fn is_under_is_plain_prefix() {
        assert!(is_under("/admin/kds", "/admin/kds"));
        assert!(is_under("/admin/kds/pizza", "/admin/kds"));
        assert!(is_under("/admin/kds/pizza/ticket/4", "/admin/kds"));
        assert!(is_under("/admin/kds-history", "/admin/kds"));
        assert!(is_under("/admin/kdsx", "/admin/kds"));
        assert!(!is_under("/admin", "/admin/kds"));
        assert!(!is_under("/other/admin/kds", "/admin/kds"));
    }

    #[test]
    fn is_under_with_trailing_slash_root() {
        assert!(is_under("/admin/kds/pizza", "/admin/kds/"));
        assert!(!is_under("/admin/kds", "/admin/kds/"));
    }

    #[test]
    fn permission_is_under_sibling_prefix() {
        assert!(Permission::new("/admin/kds-history").is_under("/admin/kds"));
        assert!(!Permission::new("/admin/kd").is_under("/admin/kds"));
    }

    #[test]
    fn permission_serde_is_transparent() {
        let p = Permission::new("/admin/logs");
        let json = serde_json::to_string(&p).expect("serialize permission");
        assert_eq!(json, "\"/admin/logs\"");
    }
}
