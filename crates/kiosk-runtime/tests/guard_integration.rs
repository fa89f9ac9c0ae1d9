//! Navigation guard against a loading registry and a live session.

use kiosk_auth::{DecisionReason, MarketingAuthorizer, Role, RouteAuthorizer, Session};
use kiosk_runtime::{
    GuardOutcome, InMemorySessionProvider, NavigationGuard, RecordingNavigator, RegistryError,
    RoleRegistry, RoleStore, SessionProvider,
};
use std::sync::Arc;
use std::time::Duration;

fn roles() -> Vec<Role> {
    vec![
        Role::new("admin", "Admin").with_permission("*"),
        Role::new("kds", "Kitchen").with_permission("/admin/kds"),
        Role::new("pizza-station", "Pizza").with_permission("/admin/kds/pizza"),
        Role::new("cashier", "Cashier").with_permission("/admin/cashier"),
    ]
}

struct Harness {
    guard: NavigationGuard<RouteAuthorizer>,
    sessions: InMemorySessionProvider,
    store: RoleStore,
    navigator: Arc<RecordingNavigator>,
}

fn harness(session: Option<Session>, store: RoleStore, path: &str) -> Harness {
    let sessions = match session {
        Some(s) => InMemorySessionProvider::with_session(s),
        None => InMemorySessionProvider::new(),
    };
    let navigator = Arc::new(RecordingNavigator::at(path));
    let guard = NavigationGuard::new(
        RouteAuthorizer::default(),
        Arc::new(sessions.clone()),
        Arc::new(store.clone()),
        navigator.clone(),
    );
    Harness {
        guard,
        sessions,
        store,
        navigator,
    }
}

fn reason(outcome: &GuardOutcome) -> Option<DecisionReason> {
    outcome.decision().map(|d| d.reason)
}

#[tokio::test]
async fn direct_match_allows_without_redirect() {
    let h = harness(
        Some(Session::new("sam", Some("cashier"))),
        RoleStore::from_roles(roles()),
        "/admin/cashier",
    );

    let outcome = h.guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::DirectMatch));
    assert!(h.navigator.redirects().is_empty());
}

#[tokio::test]
async fn no_permission_redirects_to_sign_in() {
    let h = harness(
        Some(Session::new("luca", Some("pizza-station"))),
        RoleStore::from_roles(roles()),
        "/admin/settings",
    );

    let outcome = h.guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::NoPermission));
    assert_eq!(h.navigator.redirects(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn station_role_reaches_shared_kds_chrome() {
    let h = harness(
        Some(Session::new("luca", Some("pizza-station"))),
        RoleStore::from_roles(roles()),
        "/admin/kds",
    );

    let outcome = h.guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::PrefixMatch));
}

#[tokio::test]
async fn resolve_waits_for_registry_then_decides() {
    let h = harness(
        Some(Session::new("sam", Some("cashier"))),
        RoleStore::loading(),
        "/admin/cashier",
    );

    let store = h.store.clone();
    let loader = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        store.finish(Ok(roles()));
    });

    let outcome = tokio::time::timeout(Duration::from_secs(5), h.guard.resolve("/admin/cashier"))
        .await
        .expect("should resolve once the registry loads");
    loader.await.expect("loader should finish");

    assert_eq!(reason(&outcome), Some(DecisionReason::DirectMatch));
    assert!(h.navigator.redirects().is_empty());
}

#[tokio::test]
async fn root_is_allowed_while_registry_never_loads() {
    let h = harness(
        Some(Session::new("root", Some("root"))),
        RoleStore::loading(),
        "/admin/roles",
    );

    let outcome = tokio::time::timeout(Duration::from_secs(1), h.guard.resolve_current())
        .await
        .expect("root must not wait for the registry");
    assert_eq!(reason(&outcome), Some(DecisionReason::Superuser));
}

#[tokio::test]
async fn failed_load_denies_with_roles_unavailable() {
    let h = harness(
        Some(Session::new("ana", Some("admin"))),
        RoleStore::loading(),
        "/admin",
    );
    h.store
        .finish(Err(RegistryError::LoadFailed("settings backend unreachable".into())));

    let outcome = h.guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::RolesUnavailable));
    assert_eq!(h.navigator.last_redirect().as_deref(), Some("/login"));
}

#[tokio::test]
async fn failed_load_still_admits_root() {
    let h = harness(
        Some(Session::new("root", Some("root"))),
        RoleStore::loading(),
        "/admin",
    );
    h.store
        .finish(Err(RegistryError::LoadFailed("disk full".into())));

    let outcome = h.guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::Superuser));
}

#[tokio::test]
async fn sign_out_during_wait_resolves_unauthenticated() {
    let h = harness(
        Some(Session::new("ana", Some("admin"))),
        RoleStore::loading(),
        "/admin/menu",
    );

    let sessions = h.sessions.clone();
    let store = h.store.clone();
    let racer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        sessions.logout();
        store.finish(Ok(roles()));
    });

    let outcome = tokio::time::timeout(Duration::from_secs(5), h.guard.resolve_current())
        .await
        .expect("should resolve after the registry loads");
    racer.await.expect("racer should finish");

    assert_eq!(reason(&outcome), Some(DecisionReason::Unauthenticated));
    assert_eq!(h.navigator.last_redirect().as_deref(), Some("/login"));
}

#[tokio::test]
async fn sign_out_resolves_even_if_registry_never_loads() {
    let h = harness(
        Some(Session::new("ana", Some("admin"))),
        RoleStore::loading(),
        "/admin/menu",
    );

    let sessions = h.sessions.clone();
    let racer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        sessions.logout();
    });

    let outcome = tokio::time::timeout(Duration::from_secs(2), h.guard.resolve_current())
        .await
        .expect("sign-out should end the wait");
    racer.await.expect("racer should finish");

    assert_eq!(reason(&outcome), Some(DecisionReason::Unauthenticated));
    assert_eq!(h.navigator.last_redirect().as_deref(), Some("/login"));
    assert!(h.store.snapshot().is_loading);
}

#[tokio::test]
async fn restoring_session_is_awaited() {
    let sessions = InMemorySessionProvider::restoring();
    let navigator = Arc::new(RecordingNavigator::at("/admin/kds"));
    let guard = NavigationGuard::new(
        RouteAuthorizer::default(),
        Arc::new(sessions.clone()),
        Arc::new(RoleStore::from_roles(roles())),
        navigator,
    );

    let restorer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        sessions.sign_in(Session::new("kai", Some("kds")));
    });

    let outcome = tokio::time::timeout(Duration::from_secs(5), guard.resolve_current())
        .await
        .expect("should resolve once the session is restored");
    restorer.await.expect("restorer should finish");

    assert_eq!(reason(&outcome), Some(DecisionReason::DirectMatch));
}

#[tokio::test]
async fn logout_reguards_current_path() {
    let h = harness(
        Some(Session::new("ana", Some("admin"))),
        RoleStore::from_roles(roles()),
        "/admin/reports",
    );
    assert!(h.guard.resolve_current().await.is_allowed());

    let outcome = h.guard.logout().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::Unauthenticated));
    assert!(h.sessions.current().session.is_none());
}

#[tokio::test]
async fn marketing_wrong_role_goes_to_storefront() {
    let navigator = Arc::new(RecordingNavigator::at("/marketing"));
    let guard = NavigationGuard::new(
        MarketingAuthorizer::default(),
        Arc::new(InMemorySessionProvider::with_session(Session::new(
            "ana",
            Some("admin"),
        ))),
        Arc::new(RoleStore::loading()),
        navigator.clone(),
    );

    let outcome = guard.resolve_current().await;
    assert_eq!(reason(&outcome), Some(DecisionReason::RoleMismatch));
    assert_eq!(navigator.last_redirect().as_deref(), Some("/"));
}

#[tokio::test]
async fn decisions_are_recomputed_after_registry_edits() {
    let h = harness(
        Some(Session::new("sam", Some("cashier"))),
        RoleStore::from_roles(roles()),
        "/admin/orders",
    );
    assert!(!h.guard.evaluate("/admin/orders").is_allowed());

    h.store
        .upsert(
            Role::new("cashier", "Cashier")
                .with_permissions(["/admin/cashier", "/admin/orders"]),
        )
        .expect("valid role should be accepted");

    assert!(h.guard.evaluate("/admin/orders").is_allowed());
    h.store.wait_ready().await;
}
