//! In-memory role store.

use super::{load_roles_file, RegistryError, RegistrySnapshot, RoleRegistry};
use async_trait::async_trait;
use kiosk_auth::{duplicate_role_ids, find_role, PermissionCatalog, Role};
use kiosk_types::RoleId;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    state: LoadState,
    roles: Arc<Vec<Role>>,
}

/// Thread-safe role cache with a one-shot initial load.
///
/// Cloning a `RoleStore` gives another handle to the same cache.
///
/// # Lifecycle
///
/// ```text
/// Loading ──finish(Ok)──▶ Ready  ◀── upsert / remove
///    │
///    └──finish(Err)──▶ Failed   (terminal, empty roles)
/// ```
///
/// There is no retry and no cancellation. Only the first `finish` counts.
///
/// # Example
///
/// ```
/// use kiosk_auth::Role;
/// use kiosk_runtime::{RoleRegistry, RoleStore};
///
/// let store = RoleStore::loading();
/// assert!(store.snapshot().is_loading);
///
/// store.finish(Ok(vec![Role::new("admin", "Admin").with_permission("*")]));
/// let snapshot = store.snapshot();
/// assert!(!snapshot.is_loading);
/// assert_eq!(snapshot.roles.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RoleStore {
    inner: Arc<RwLock<Inner>>,
    ready: Arc<watch::Sender<bool>>,
    catalog: PermissionCatalog,
}

impl RoleStore {
    /// Creates a store that is ready immediately.
    #[must_use]
    pub fn from_roles(roles: Vec<Role>) -> Self {
        let store = Self::new(LoadState::Ready, roles);
        store.warn_suspect_roles();
        store
    }

    /// Creates a store in the loading state. Resolve it with [`finish`](Self::finish).
    #[must_use]
    pub fn loading() -> Self {
        Self::new(LoadState::Loading, Vec::new())
    }

    /// Creates a loading store and spawns the file load on the current
    /// Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let store = Self::loading();
        let handle = store.clone();
        tokio::spawn(async move {
            tracing::debug!(path = %path.display(), "loading roles file");
            let result = load_roles_file(&path).await;
            handle.finish(result);
        });
        store
    }

    fn new(state: LoadState, roles: Vec<Role>) -> Self {
        let is_ready = !matches!(state, LoadState::Loading);
        let (tx, _rx) = watch::channel(is_ready);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state,
                roles: Arc::new(roles),
            })),
            ready: Arc::new(tx),
            catalog: PermissionCatalog::standard(),
        }
    }

    /// Settles the initial load.
    ///
    /// Returns `false` and changes nothing if the store had already settled.
    pub fn finish(&self, result: Result<Vec<Role>, RegistryError>) -> bool {
        {
            let mut inner = self.inner.write();
            if !matches!(inner.state, LoadState::Loading) {
                tracing::debug!("role store already settled, ignoring load result");
                return false;
            }

            match result {
                Ok(roles) => {
                    tracing::info!(count = roles.len(), "role registry loaded");
                    inner.roles = Arc::new(roles);
                    inner.state = LoadState::Ready;
                }
                Err(e) => {
                    tracing::error!(error = %e, "role registry failed to load");
                    inner.roles = Arc::default();
                    inner.state = LoadState::Failed(e.to_string());
                }
            }
        }

        self.warn_suspect_roles();
        self.ready.send_replace(true);
        true
    }

    fn warn_suspect_roles(&self) {
        let inner = self.inner.read();
        for role in inner.roles.iter() {
            let unknown = role.unknown_permissions(&self.catalog);
            if !unknown.is_empty() {
                let unknown: Vec<&str> = unknown.iter().map(|p| p.as_str()).collect();
                tracing::warn!(role = %role.id, ?unknown, "role grants unrecognized permissions");
            }
        }
        for id in duplicate_role_ids(&inner.roles) {
            tracing::warn!(role = %id, "duplicate role id, only the first entry is used");
        }
    }

    /// Role ids that occur more than once, one entry per shadowed role.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<RoleId> {
        let inner = self.inner.read();
        duplicate_role_ids(&inner.roles).into_iter().cloned().collect()
    }

    /// Returns `true` while the initial load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.inner.read().state, LoadState::Loading)
    }

    /// Returns the failure message of a failed load.
    #[must_use]
    pub fn failure(&self) -> Option<String> {
        match &self.inner.read().state {
            LoadState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Looks up one role by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Role> {
        let inner = self.inner.read();
        find_role(&inner.roles, &RoleId::new(id)).cloned()
    }

    /// Number of roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().roles.len()
    }

    /// Returns `true` if there are no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or replaces a role after validating it against the catalog.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Invalid`] if the role fails validation
    /// - [`RegistryError::NotReady`] while loading
    /// - [`RegistryError::LoadFailed`] after a failed load
    pub fn upsert(&self, role: Role) -> Result<(), RegistryError> {
        role.validate(&self.catalog)?;

        let mut inner = self.inner.write();
        Self::check_writable(&inner)?;

        let roles = Arc::make_mut(&mut inner.roles);
        match roles.iter_mut().find(|r| r.id == role.id) {
            Some(existing) => *existing = role,
            None => roles.push(role),
        }
        Ok(())
    }

    /// Removes a role, returning it if present.
    ///
    /// # Errors
    ///
    /// Same state errors as [`upsert`](Self::upsert).
    pub fn remove(&self, id: &str) -> Result<Option<Role>, RegistryError> {
        let mut inner = self.inner.write();
        Self::check_writable(&inner)?;

        let roles = Arc::make_mut(&mut inner.roles);
        Ok(roles
            .iter()
            .position(|r| r.id.as_str() == id)
            .map(|index| roles.remove(index)))
    }

    fn check_writable(inner: &Inner) -> Result<(), RegistryError> {
        match &inner.state {
            LoadState::Ready => Ok(()),
            LoadState::Loading => Err(RegistryError::NotReady),
            LoadState::Failed(message) => Err(RegistryError::LoadFailed(message.clone())),
        }
    }
}

#[async_trait]
impl RoleRegistry for RoleStore {
    fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.read();
        RegistrySnapshot {
            roles: Arc::clone(&inner.roles),
            is_loading: matches!(inner.state, LoadState::Loading),
        }
    }

    async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}
