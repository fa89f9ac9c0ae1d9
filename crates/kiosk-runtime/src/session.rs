//! Session provider boundary.

use async_trait::async_trait;
use kiosk_auth::Session;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// The current session as seen at one instant.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// The signed-in session, if any.
    pub session: Option<Session>,
    /// `true` while the provider is still restoring a session.
    pub is_loading: bool,
}

/// Source of the current session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current session state.
    fn current(&self) -> SessionSnapshot;

    /// Signs the current user out.
    fn logout(&self);

    /// Resolves once the provider is no longer loading.
    async fn wait_ready(&self);

    /// Subscribes to session changes.
    ///
    /// The value advances on every sign-in, sign-out and loading transition.
    /// A fresh receiver has already seen the current value.
    fn changes(&self) -> watch::Receiver<u64>;
}

#[derive(Debug, Default)]
struct State {
    session: Option<Session>,
    is_loading: bool,
}

/// In-memory session provider.
///
/// Cloning gives another handle to the same session.
///
/// # Example
///
/// ```
/// use kiosk_auth::Session;
/// use kiosk_runtime::{InMemorySessionProvider, SessionProvider};
///
/// let provider = InMemorySessionProvider::new();
/// provider.sign_in(Session::new("ana", Some("admin")));
/// assert!(provider.current().session.is_some());
///
/// provider.logout();
/// assert!(provider.current().session.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InMemorySessionProvider {
    state: Arc<RwLock<State>>,
    ready: Arc<watch::Sender<bool>>,
    generation: Arc<watch::Sender<u64>>,
}

impl Default for InMemorySessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionProvider {
    /// Creates a settled provider with no session.
    #[must_use]
    pub fn new() -> Self {
        let (ready, _) = watch::channel(true);
        let (generation, _) = watch::channel(0);
        Self {
            state: Arc::new(RwLock::new(State::default())),
            ready: Arc::new(ready),
            generation: Arc::new(generation),
        }
    }

    fn bump(&self) {
        self.generation.send_modify(|g| *g = g.wrapping_add(1));
    }

    /// Creates a settled provider holding `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let provider = Self::new();
        provider.sign_in(session);
        provider
    }

    /// Creates a provider that is still restoring its session.
    #[must_use]
    pub fn restoring() -> Self {
        let provider = Self::new();
        provider.set_loading(true);
        provider
    }

    /// Replaces the current session and settles the provider.
    pub fn sign_in(&self, session: Session) {
        tracing::debug!(session = %session, "signed in");
        {
            let mut state = self.state.write();
            state.session = Some(session);
            state.is_loading = false;
        }
        self.ready.send_replace(true);
        self.bump();
    }

    /// Marks the provider as loading or settled.
    pub fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
        self.ready.send_replace(!loading);
        self.bump();
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    fn current(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            session: state.session.clone(),
            is_loading: state.is_loading,
        }
    }

    fn logout(&self) {
        let Some(session) = self.state.write().session.take() else {
            return;
        };
        tracing::debug!(session = %session, "signed out");
        self.bump();
    }

    async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        let _ = rx.wait_for(|ready| *ready).await;
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}
