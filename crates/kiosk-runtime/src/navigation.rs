//! Navigation guard: applies a [`RouteGuard`] to live session and registry state.
//!
//! # Flow
//!
//! ```text
//! resolve(path)
//!   │
//!   ├─ session loading? ──────────────▶ wait, re-read
//!   ├─ decide_without_registry ───────▶ decision (root, no session)
//!   ├─ registry loading? ─────────────▶ wait, re-read
//!   └─ authorize(session, path, roles)
//!          │
//!          ├─ allowed ──▶ Allowed
//!          └─ denied  ──▶ diagnostics, Navigator::redirect ──▶ Redirect
//! ```
//!
//! While the registry loads, the wait also ends on any session change. The
//! session is then read again, so a sign-out that lands while the registry is
//! loading resolves to `UNAUTHENTICATED` even if the load never finishes.

use crate::registry::RoleRegistry;
use crate::session::{SessionProvider, SessionSnapshot};
use kiosk_auth::{
    filter_stations, has_full_station_access, should_render_station_nav, AuthSettings,
    AuthorizationDecision, DecisionReason, RouteGuard, Session, StationLink,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Navigation service boundary.
pub trait Navigator: Send + Sync {
    /// The path currently displayed.
    fn current_path(&self) -> String;

    /// Sends the user to `path`.
    fn redirect(&self, path: &str);
}

/// A [`Navigator`] that records redirects instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator positioned at `path`.
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(path.into()),
            redirects: Mutex::default(),
        }
    }

    /// Every redirect so far, oldest first.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }

    /// The most recent redirect.
    #[must_use]
    pub fn last_redirect(&self) -> Option<String> {
        self.redirects.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.lock().push(path.to_string());
        *self.current.lock() = path.to_string();
    }
}

/// Result of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session or registry still loading; nothing decided yet.
    Pending,
    /// Navigation may proceed.
    Allowed(AuthorizationDecision),
    /// Navigation denied and redirected.
    Redirect {
        /// Redirect target.
        to: String,
        /// The denial.
        decision: AuthorizationDecision,
    },
}

impl GuardOutcome {
    /// Returns `true` for [`GuardOutcome::Pending`].
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` for [`GuardOutcome::Allowed`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// The decision, unless pending.
    #[must_use]
    pub fn decision(&self) -> Option<&AuthorizationDecision> {
        match self {
            Self::Pending => None,
            Self::Allowed(decision) | Self::Redirect { decision, .. } => Some(decision),
        }
    }
}

/// Runs a [`RouteGuard`] against the live collaborators.
pub struct NavigationGuard<G> {
    guard: G,
    sessions: Arc<dyn SessionProvider>,
    registry: Arc<dyn RoleRegistry>,
    navigator: Arc<dyn Navigator>,
}

impl<G: RouteGuard> NavigationGuard<G> {
    /// Creates a navigation guard.
    pub fn new(
        guard: G,
        sessions: Arc<dyn SessionProvider>,
        registry: Arc<dyn RoleRegistry>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            guard,
            sessions,
            registry,
            navigator,
        }
    }

    /// The wrapped route guard.
    pub fn guard(&self) -> &G {
        &self.guard
    }

    /// Decides from the current snapshots without waiting or side effects.
    #[must_use]
    pub fn evaluate(&self, path: &str) -> GuardOutcome {
        self.decide(&self.sessions.current(), path)
    }

    fn decide(&self, current: &SessionSnapshot, path: &str) -> GuardOutcome {
        if current.is_loading {
            return GuardOutcome::Pending;
        }
        let session = current.session.as_ref();

        if let Some(decision) = self.guard.decide_without_registry(session, path) {
            return self.outcome(decision);
        }

        let registry = self.registry.snapshot();
        if registry.is_loading {
            return GuardOutcome::Pending;
        }

        self.outcome(self.guard.authorize(session, path, registry.roles()))
    }

    fn outcome(&self, decision: AuthorizationDecision) -> GuardOutcome {
        match self.guard.denial_redirect(&decision) {
            Some(to) if decision.is_denied() => GuardOutcome::Redirect {
                to: to.to_string(),
                decision,
            },
            _ => GuardOutcome::Allowed(decision),
        }
    }

    /// Waits until a decision can be made, then applies it: emits
    /// diagnostics and redirects on denial.
    pub async fn resolve(&self, path: &str) -> GuardOutcome {
        loop {
            let mut changes = self.sessions.changes();
            let current = self.sessions.current();
            let outcome = self.decide(&current, path);
            if !outcome.is_pending() {
                self.apply(path, current.session.as_ref(), &outcome);
                return outcome;
            }

            if current.is_loading {
                self.sessions.wait_ready().await;
                continue;
            }
            tokio::select! {
                () = self.registry.wait_ready() => {}
                changed = changes.changed() => {
                    if changed.is_err() {
                        self.registry.wait_ready().await;
                    }
                }
            }
        }
    }

    /// [`resolve`](Self::resolve) for the navigator's current path.
    pub async fn resolve_current(&self) -> GuardOutcome {
        let path = self.navigator.current_path();
        self.resolve(&path).await
    }

    fn apply(&self, path: &str, session: Option<&Session>, outcome: &GuardOutcome) {
        let user = session.map(Session::username);
        let role = session.and_then(Session::role).map(|r| r.as_str());

        match outcome {
            GuardOutcome::Pending => {}
            GuardOutcome::Allowed(decision) => {
                tracing::debug!(
                    ?user,
                    ?role,
                    path,
                    reason = %decision.reason,
                    "navigation allowed"
                );
            }
            GuardOutcome::Redirect { to, decision } => {
                match decision.reason {
                    DecisionReason::Unauthenticated => {
                        tracing::info!(path, redirect = %to, "navigation denied: not signed in");
                    }
                    reason if reason.is_misconfiguration() => {
                        tracing::warn!(
                            ?user,
                            ?role,
                            path,
                            reason = %reason,
                            "navigation denied: role registry misconfigured"
                        );
                    }
                    reason => {
                        tracing::debug!(
                            ?user,
                            ?role,
                            path,
                            reason = %reason,
                            redirect = %to,
                            "navigation denied"
                        );
                    }
                }
                self.navigator.redirect(to);
            }
        }
    }

    /// Signs out through the session provider and re-guards the current path.
    pub async fn logout(&self) -> GuardOutcome {
        self.sessions.logout();
        self.resolve_current().await
    }
}

/// The station switcher state for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationNav {
    /// Links the user may see.
    pub links: Vec<StationLink>,
    /// Whether the switcher renders at all.
    pub render: bool,
}

/// Computes the station switcher for the current session and registry.
///
/// Returns `None` while either collaborator is loading.
#[must_use]
pub fn station_nav(
    sessions: &dyn SessionProvider,
    registry: &dyn RoleRegistry,
    settings: &AuthSettings,
    links: &[StationLink],
) -> Option<StationNav> {
    let current = sessions.current();
    let snapshot = registry.snapshot();
    if current.is_loading || snapshot.is_loading {
        return None;
    }

    let role = current.session.as_ref().and_then(Session::role);
    let full = has_full_station_access(role, snapshot.roles(), settings);
    let visible = filter_stations(links, role, full);
    let render = should_render_station_nav(&visible, full);

    Some(StationNav {
        links: visible.into_iter().copied().collect(),
        render,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RoleStore;
    use crate::session::InMemorySessionProvider;
    use kiosk_auth::{MarketingAuthorizer, Role, RouteAuthorizer, STATION_LINKS};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn roles() -> Vec<Role> {
        vec![
            Role::new("admin", "Admin").with_permission("*"),
            Role::new("pizza-station", "Pizza").with_permission("/admin/kds/pizza"),
        ]
    }

    fn guard_with(
        session: Option<Session>,
        store: RoleStore,
    ) -> (NavigationGuard<RouteAuthorizer>, Arc<RecordingNavigator>) {
        let sessions = match session {
            Some(s) => InMemorySessionProvider::with_session(s),
            None => InMemorySessionProvider::new(),
        };
        let navigator = Arc::new(RecordingNavigator::at("/admin"));
        let guard = NavigationGuard::new(
            RouteAuthorizer::default(),
            Arc::new(sessions),
            Arc::new(store),
            navigator.clone(),
        );
        (guard, navigator)
    }

    #[test]
    fn evaluate_pending_while_registry_loads() {
        let (guard, navigator) =
            guard_with(Some(Session::new("ana", Some("admin"))), RoleStore::loading());
        assert!(guard.evaluate("/admin/menu").is_pending());
        assert!(navigator.redirects().is_empty());
    }

    #[test]
    fn root_decided_while_registry_loads() {
        let (guard, _) = guard_with(Some(Session::new("root", Some("root"))), RoleStore::loading());
        let outcome = guard.evaluate("/admin/settings");
        assert_eq!(
            outcome.decision().map(|d| d.reason),
            Some(DecisionReason::Superuser)
        );
    }

    #[test]
    fn no_session_redirects_to_sign_in() {
        let (guard, _) = guard_with(None, RoleStore::loading());
        assert!(matches!(
            guard.evaluate("/admin"),
            GuardOutcome::Redirect { ref to, .. } if to == "/login"
        ));
    }

    #[test]
    fn evaluate_has_no_side_effects() {
        let (guard, navigator) = guard_with(
            Some(Session::new("luca", Some("pizza-station"))),
            RoleStore::from_roles(roles()),
        );
        assert!(!guard.evaluate("/admin/menu").is_allowed());
        assert!(navigator.redirects().is_empty());
    }

    #[test]
    fn marketing_never_waits_for_registry() {
        let navigator = Arc::new(RecordingNavigator::at("/marketing"));
        let guard = NavigationGuard::new(
            MarketingAuthorizer::default(),
            Arc::new(InMemorySessionProvider::with_session(Session::new(
                "mia",
                Some("marketing"),
            ))),
            Arc::new(RoleStore::loading()),
            navigator,
        );
        assert!(guard.evaluate("/marketing").is_allowed());
    }

    #[test]
    fn restoring_session_is_pending() {
        let navigator = Arc::new(RecordingNavigator::at("/admin"));
        let guard = NavigationGuard::new(
            RouteAuthorizer::default(),
            Arc::new(InMemorySessionProvider::restoring()),
            Arc::new(RoleStore::from_roles(roles())),
            navigator,
        );
        assert!(guard.evaluate("/admin").is_pending());
    }

    /// Hands out the signed-in session once, then reports it signed out.
    struct FlippingSessions {
        reads: AtomicUsize,
        changes: tokio::sync::watch::Sender<u64>,
    }

    #[async_trait::async_trait]
    impl SessionProvider for FlippingSessions {
        fn current(&self) -> SessionSnapshot {
            let first = self.reads.fetch_add(1, Ordering::SeqCst) == 0;
            SessionSnapshot {
                session: first.then(|| Session::new("ana", Some("admin"))),
                is_loading: false,
            }
        }

        fn logout(&self) {}

        async fn wait_ready(&self) {}

        fn changes(&self) -> tokio::sync::watch::Receiver<u64> {
            self.changes.subscribe()
        }
    }

    #[tokio::test]
    async fn resolve_reads_the_session_once_per_decision() {
        let sessions = Arc::new(FlippingSessions {
            reads: AtomicUsize::new(0),
            changes: tokio::sync::watch::channel(0).0,
        });
        let navigator = Arc::new(RecordingNavigator::at("/admin/menu"));
        let guard = NavigationGuard::new(
            RouteAuthorizer::default(),
            sessions.clone(),
            Arc::new(RoleStore::from_roles(roles())),
            navigator.clone(),
        );

        let outcome = guard.resolve_current().await;
        assert_eq!(
            outcome.decision().map(|d| d.reason),
            Some(DecisionReason::Wildcard)
        );
        assert_eq!(sessions.reads.load(Ordering::SeqCst), 1);
        assert!(navigator.redirects().is_empty());
    }

    #[test]
    fn station_nav_for_single_station_cook_is_hidden() {
        let sessions =
            InMemorySessionProvider::with_session(Session::new("luca", Some("pizza-station")));
        let store = RoleStore::from_roles(roles());

        let nav = station_nav(&sessions, &store, &AuthSettings::default(), STATION_LINKS)
            .expect("collaborators are settled");
        assert_eq!(nav.links.len(), 1);
        assert!(!nav.render);
    }

    #[test]
    fn station_nav_for_wildcard_role_shows_all() {
        let sessions = InMemorySessionProvider::with_session(Session::new("ana", Some("admin")));
        let store = RoleStore::from_roles(roles());

        let nav = station_nav(&sessions, &store, &AuthSettings::default(), STATION_LINKS)
            .expect("collaborators are settled");
        assert_eq!(nav.links.len(), STATION_LINKS.len());
        assert!(nav.render);
    }

    #[test]
    fn station_nav_pending_while_loading() {
        let sessions = InMemorySessionProvider::new();
        let store = RoleStore::loading();
        assert!(station_nav(&sessions, &store, &AuthSettings::default(), STATION_LINKS).is_none());
    }
}
