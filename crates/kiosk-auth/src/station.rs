//! Kitchen display station links and their visibility.
//!
//! Each physical station has one link and one required role. Full-access
//! users (the superuser, admins, the dedicated `kds` role) see every link;
//! a station cook sees only their own, and then the switcher is hidden.

use crate::role::{find_role, Role};
use crate::settings::AuthSettings;
use kiosk_types::RoleId;
use serde::Serialize;

/// A navigation link to one station view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationLink {
    /// Short station name, also the last path segment.
    pub slug: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Route of the station view.
    pub href: &'static str,
    /// The one role that sees this station without full access.
    pub required_role: &'static str,
}

/// The fixed station catalog, in display order.
pub const STATION_LINKS: &[StationLink] = &[
    StationLink {
        slug: "pizza",
        label: "Pizza",
        href: "/admin/kds/pizza",
        required_role: "pizza-station",
    },
    StationLink {
        slug: "pasta",
        label: "Pasta",
        href: "/admin/kds/pasta",
        required_role: "pasta-station",
    },
    StationLink {
        slug: "fried",
        label: "Fried",
        href: "/admin/kds/fried",
        required_role: "fried-station",
    },
    StationLink {
        slug: "beverage",
        label: "Beverage",
        href: "/admin/kds/beverage",
        required_role: "beverage-station",
    },
];

/// Returns the links the user may see, preserving catalog order.
///
/// With full access every link is returned. Otherwise only links whose
/// required role equals `role` exactly.
///
/// # Example
///
/// ```
/// use kiosk_auth::{filter_stations, STATION_LINKS};
/// use kiosk_types::RoleId;
///
/// let fryer = RoleId::new("fried-station");
/// let visible = filter_stations(STATION_LINKS, Some(&fryer), false);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].slug, "fried");
///
/// let admin = RoleId::new("admin");
/// assert_eq!(filter_stations(STATION_LINKS, Some(&admin), true).len(), STATION_LINKS.len());
/// ```
#[must_use]
pub fn filter_stations<'a>(
    links: &'a [StationLink],
    role: Option<&RoleId>,
    has_full_access: bool,
) -> Vec<&'a StationLink> {
    if has_full_access {
        return links.iter().collect();
    }

    match role {
        Some(role) => links
            .iter()
            .filter(|link| role.as_str() == link.required_role)
            .collect(),
        None => Vec::new(),
    }
}

/// Returns `true` if the station switcher should render.
///
/// A user without full access who sees at most one station gets no
/// switcher. Nothing renders when no link is visible at all.
#[must_use]
pub fn should_render_station_nav(visible: &[&StationLink], has_full_access: bool) -> bool {
    !visible.is_empty() && (has_full_access || visible.len() > 1)
}

/// Returns `true` if `role` sees every station.
///
/// Full access is granted by membership in
/// [`AuthSettings::full_access_roles`], or by the registry granting the
/// role the wildcard permission.
#[must_use]
pub fn has_full_station_access(
    role: Option<&RoleId>,
    roles: &[Role],
    settings: &AuthSettings,
) -> bool {
    let Some(role) = role else {
        return false;
    };

    settings.is_full_access_role(role.as_str())
        || find_role(roles, role).is_some_and(Role::has_wildcard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(links: &[&StationLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.slug).collect()
    }

    #[test]
    fn station_role_sees_own_station() {
        let role = RoleId::new("fried-station");
        let visible = filter_stations(STATION_LINKS, Some(&role), false);
        assert_eq!(slugs(&visible), vec!["fried"]);
        assert_eq!(visible[0].required_role, "fried-station");
    }

    #[test]
    fn full_access_sees_all_in_order() {
        let role = RoleId::new("admin");
        let visible = filter_stations(STATION_LINKS, Some(&role), true);
        assert_eq!(slugs(&visible), vec!["pizza", "pasta", "fried", "beverage"]);
    }

    #[test]
    fn unrelated_role_sees_nothing() {
        let role = RoleId::new("cashier");
        assert!(filter_stations(STATION_LINKS, Some(&role), false).is_empty());
        assert!(filter_stations(STATION_LINKS, None, false).is_empty());
    }

    #[test]
    fn filter_preserves_custom_order() {
        let links = [STATION_LINKS[3], STATION_LINKS[0]];
        let role = RoleId::new("kds");
        let visible = filter_stations(&links, Some(&role), true);
        assert_eq!(slugs(&visible), vec!["beverage", "pizza"]);
    }

    #[test]
    fn nav_hidden_for_single_station_user() {
        let role = RoleId::new("pizza-station");
        let visible = filter_stations(STATION_LINKS, Some(&role), false);
        assert!(!should_render_station_nav(&visible, false));
        assert!(!should_render_station_nav(&[], false));
    }

    #[test]
    fn nav_shown_for_full_access() {
        let visible = filter_stations(STATION_LINKS, None, true);
        assert!(should_render_station_nav(&visible, true));
        assert!(should_render_station_nav(&visible[..1], true));
        assert!(!should_render_station_nav(&[], true));
    }

    #[test]
    fn nav_shown_when_several_links_match() {
        let duplicate = [STATION_LINKS[0], STATION_LINKS[0]];
        let role = RoleId::new("pizza-station");
        let visible = filter_stations(&duplicate, Some(&role), false);
        assert!(should_render_station_nav(&visible, false));
    }

    #[test]
    fn full_access_by_configured_role() {
        let settings = AuthSettings::default();
        for role in ["root", "admin", "kds"] {
            assert!(has_full_station_access(Some(&RoleId::new(role)), &[], &settings), "{role}");
        }
        assert!(!has_full_station_access(Some(&RoleId::new("pizza-station")), &[], &settings));
        assert!(!has_full_station_access(None, &[], &settings));
    }

    #[test]
    fn full_access_by_registry_wildcard() {
        let settings = AuthSettings::default();
        let roles = vec![
            Role::new("gm", "General manager").with_permission("*"),
            Role::new("pizza-station", "Pizza").with_permission("/admin/kds/pizza"),
        ];
        assert!(has_full_station_access(Some(&RoleId::new("gm")), &roles, &settings));
        assert!(!has_full_station_access(Some(&RoleId::new("pizza-station")), &roles, &settings));
    }

    #[test]
    fn every_station_role_is_unique() {
        let mut roles: Vec<_> = STATION_LINKS.iter().map(|l| l.required_role).collect();
        roles.sort_unstable();
        roles.dedup();
        assert_eq!(roles.len(), STATION_LINKS.len());
    }
}
