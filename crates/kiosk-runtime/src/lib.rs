//! Runtime layer for kiosk route authorization.
//!
//! Connects the pure authorizers in [`kiosk_auth`] to live state:
//!
//! | Boundary | Trait | Default |
//! |----------|-------|---------|
//! | Role registry | [`RoleRegistry`] | [`RoleStore`] |
//! | Session | [`SessionProvider`] | [`InMemorySessionProvider`] |
//! | Navigation | [`Navigator`] | [`RecordingNavigator`] |
//!
//! [`NavigationGuard`] ties them together: it waits while the session or
//! registry is loading, emits diagnostics and redirects on denial.
//!
//! # Crate Architecture
//!
//! ```text
//! kiosk-types
//!     ↑
//! kiosk-auth
//!     ↑
//! kiosk-runtime  ◄── THIS CRATE
//!     ↑
//! kiosk-cli
//! ```
//!
//! # Example
//!
//! ```
//! use kiosk_auth::{Role, RouteAuthorizer, Session};
//! use kiosk_runtime::{
//!     GuardOutcome, InMemorySessionProvider, NavigationGuard, RecordingNavigator, RoleStore,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = RoleStore::from_roles(vec![
//!     Role::new("cashier", "Cashier").with_permission("/admin/cashier"),
//! ]);
//! let sessions = InMemorySessionProvider::with_session(Session::new("sam", Some("cashier")));
//! let navigator = Arc::new(RecordingNavigator::at("/admin/menu"));
//!
//! let guard = NavigationGuard::new(
//!     RouteAuthorizer::default(),
//!     Arc::new(sessions),
//!     Arc::new(store),
//!     navigator.clone(),
//! );
//!
//! let outcome = guard.resolve_current().await;
//! assert!(matches!(outcome, GuardOutcome::Redirect { .. }));
//! assert_eq!(navigator.last_redirect().as_deref(), Some("/login"));
//! # }
//! ```

pub mod config;
pub mod navigation;
pub mod registry;
pub mod session;

pub use navigation::{
    station_nav, GuardOutcome, NavigationGuard, Navigator, RecordingNavigator, StationNav,
};
pub use registry::{
    load_roles_file, parse_roles, RegistryError, RegistrySnapshot, RoleRegistry, RoleStore,
};
pub use session::{InMemorySessionProvider, SessionProvider, SessionSnapshot};
