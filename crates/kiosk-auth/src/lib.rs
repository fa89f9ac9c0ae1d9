//! Route authorization for the kiosk operations console.
//!
//! This crate is the pure core of the console's role-based access control.
//! Nothing here performs I/O, logs, or holds mutable state: session and role
//! data come in as parameters and a decision comes out.
//!
//! # Model
//!
//! ```text
//! Session ──(role id)──▶ Role ──(permission set)──▶ Permission
//!                                                      │
//!                                            PermissionCatalog (labels, validation)
//! ```
//!
//! | Piece | Type | Purpose |
//! |-------|------|---------|
//! | Catalog | [`PermissionCatalog`] | Every recognized permission with labels |
//! | Role | [`Role`] | Named permission set, validated on write |
//! | Session | [`Session`] | Signed-in user and role id |
//! | Admin guard | [`RouteAuthorizer`] | Ordered rule list ([`ADMIN_RULES`]) |
//! | Marketing guard | [`MarketingAuthorizer`] | Single-role check |
//! | Stations | [`filter_stations`] | Which KDS station links a user sees |
//!
//! # Crate Architecture
//!
//! ```text
//! kiosk-types  (UserId, RoleId, ErrorCode)
//!     ↑
//! kiosk-auth   ◄── THIS CRATE
//!     ↑
//! kiosk-runtime (RoleStore, SessionProvider, NavigationGuard, config)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: an unavailable or empty registry denies, except for the superuser
//! - **Superuser first**: the bypass never depends on registry readiness
//! - **Tolerant reads, strict writes**: unknown permissions load but only writes reject them
//!
//! # Example
//!
//! ```
//! use kiosk_auth::{authorize, DecisionReason, Role, Session};
//!
//! let roles = vec![
//!     Role::new("admin", "Admin").with_permission("*"),
//!     Role::new("cashier", "Cashier").with_permission("/admin/cashier"),
//! ];
//!
//! let cashier = Session::new("sam", Some("cashier"));
//! assert_eq!(
//!     authorize(Some(&cashier), "/admin/cashier", &roles).reason,
//!     DecisionReason::DirectMatch,
//! );
//! assert!(!authorize(Some(&cashier), "/admin/menu", &roles).allowed);
//! ```

pub mod authorizer;
pub mod decision;
pub mod error;
pub mod permission;
pub mod role;
pub mod rule;
pub mod session;
pub mod settings;
pub mod station;

pub use authorizer::{authorize, MarketingAuthorizer, RouteAuthorizer, RouteGuard};
pub use decision::{AuthorizationDecision, DecisionReason};
pub use error::RoleError;
pub use permission::{Permission, PermissionCatalog, PermissionEntry, KDS_SECTION_ROOT, WILDCARD};
pub use role::{duplicate_role_ids, find_role, validate_roles, Role};
pub use rule::{Rule, ADMIN_RULES};
pub use session::Session;
pub use settings::AuthSettings;
pub use station::{
    filter_stations, has_full_station_access, should_render_station_nav, StationLink, STATION_LINKS,
};

// Re-export identifiers for convenience
pub use kiosk_types::{RoleId, UserId};
