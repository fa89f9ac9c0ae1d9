//! Role registry: the source of role definitions for the authorizer.
//!
//! # Architecture
//!
//! ```text
//! RoleRegistry trait (THIS MODULE)     ← what the guard reads
//!          │
//!          └── RoleStore               ← in-memory cache, one-shot load
//!                   │
//!                   └── load_roles_file (TOML / JSON)
//! ```
//!
//! # Contract
//!
//! | `is_loading` | `roles` | Guard behavior |
//! |--------------|---------|----------------|
//! | `true` | any | wait, never deny (root still passes) |
//! | `false` | empty | deny with `ROLES_UNAVAILABLE` |
//! | `false` | non-empty | evaluate the rule list |

mod error;
mod file;
mod store;

pub use error::RegistryError;
pub use file::{load_roles_file, parse_roles};
pub use store::RoleStore;

use async_trait::async_trait;
use kiosk_auth::Role;
use std::sync::Arc;

/// A point-in-time view of the registry.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    /// Roles in registry order.
    pub roles: Arc<Vec<Role>>,
    /// `true` until the initial load settles.
    pub is_loading: bool,
}

impl RegistrySnapshot {
    /// A settled snapshot over `roles`.
    #[must_use]
    pub fn ready(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(roles),
            is_loading: false,
        }
    }

    /// A snapshot taken while the load is in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            roles: Arc::default(),
            is_loading: true,
        }
    }

    /// Returns the roles as a slice.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// Read side of the role registry.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Returns the current roles and loading flag.
    fn snapshot(&self) -> RegistrySnapshot;

    /// Resolves once the registry has left the loading state.
    ///
    /// Resolves immediately if it already has. A failed load also counts
    /// as settled.
    async fn wait_ready(&self);
}
