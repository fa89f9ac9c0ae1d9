//! Subcommand implementations.

use anyhow::{Context, Result};
use kiosk_auth::{
    duplicate_role_ids, filter_stations, has_full_station_access, should_render_station_nav,
    MarketingAuthorizer, PermissionCatalog, Role, RouteAuthorizer, RouteGuard, Session,
    STATION_LINKS,
};
use kiosk_runtime::config::KioskConfig;
use kiosk_runtime::{
    load_roles_file, GuardOutcome, InMemorySessionProvider, NavigationGuard, RecordingNavigator,
    RoleRegistry, RoleStore,
};
use kiosk_types::{ErrorCode, RoleId};
use std::process::ExitCode;
use std::sync::Arc;

/// Exit code for a denied `check`.
const EXIT_DENIED: u8 = 2;

/// Username used by `check` when only `--role` is given.
const DEFAULT_USER: &str = "operator";

pub fn permissions() -> Result<ExitCode> {
    for entry in PermissionCatalog::standard().list_all() {
        println!("{:<22} {:<20} {}", entry.id, entry.name, entry.description);
    }
    Ok(ExitCode::SUCCESS)
}

/// Builds the registry from the configured roles file and waits for the load.
///
/// Without a roles file the registry is empty, so every non-root admin
/// check fails closed.
async fn load_registry(config: &KioskConfig) -> RoleStore {
    let store = match config.roles.file {
        Some(ref path) => RoleStore::from_file(path),
        None => {
            tracing::warn!("no roles file configured, role registry is empty");
            RoleStore::from_roles(Vec::new())
        }
    };
    store.wait_ready().await;
    store
}

pub async fn stations(config: &KioskConfig, role: Option<&str>) -> Result<ExitCode> {
    let settings = config.auth_settings();
    let store = load_registry(config).await;
    let snapshot = store.snapshot();

    let role = role.map(RoleId::new);
    let full = has_full_station_access(role.as_ref(), snapshot.roles(), &settings);
    let visible = filter_stations(STATION_LINKS, role.as_ref(), full);

    for link in &visible {
        println!("{:<10} {:<10} {}", link.slug, link.label, link.href);
    }

    let switcher = if should_render_station_nav(&visible, full) {
        "shown"
    } else {
        "hidden"
    };
    println!("switcher: {switcher}");
    Ok(ExitCode::SUCCESS)
}

fn describe(role: &Role) -> String {
    let permissions: Vec<&str> = role.permissions.iter().map(|p| p.as_str()).collect();
    format!("{:<20} {:<20} {}", role.id.as_str(), role.name, permissions.join(", "))
}

pub async fn roles(config: &KioskConfig, strict: bool) -> Result<ExitCode> {
    let path = config
        .roles
        .file
        .as_ref()
        .context("no roles file: pass --roles or set KIOSK_ROLES_FILE")?;

    let roles = load_roles_file(path)
        .await
        .with_context(|| format!("cannot load roles from {}", path.display()))?;

    let catalog = PermissionCatalog::standard();
    let mut problems = Vec::new();

    for role in &roles {
        println!("{}", describe(role));
        if let Err(e) = role.validate(&catalog) {
            problems.push(format!("[{}] {e}", e.code()));
        }
    }
    for id in duplicate_role_ids(&roles) {
        problems.push(format!("duplicate role id '{id}'"));
    }

    for problem in &problems {
        eprintln!("warning: {problem}");
    }
    println!("{} role(s) loaded, {} problem(s)", roles.len(), problems.len());

    if strict && !problems.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Arguments of `kiosk check`.
#[derive(Debug)]
pub struct CheckRequest {
    pub role: Option<String>,
    pub user: Option<String>,
    pub marketing: bool,
    pub json: bool,
    pub path: String,
}

impl CheckRequest {
    fn session(&self) -> Option<Session> {
        if self.role.is_none() && self.user.is_none() {
            return None;
        }
        let user = self.user.as_deref().unwrap_or(DEFAULT_USER);
        Some(Session::new(user, self.role.as_deref()))
    }
}

pub async fn check(config: &KioskConfig, request: CheckRequest) -> Result<ExitCode> {
    let settings = config.auth_settings();
    let store = if request.marketing {
        if let Some(path) = &config.roles.file {
            tracing::debug!(path = %path.display(), "marketing guard ignores the roles file");
        }
        RoleStore::from_roles(Vec::new())
    } else {
        load_registry(config).await
    };

    let outcome = if request.marketing {
        guard_once(MarketingAuthorizer::new(settings), store, &request).await
    } else {
        guard_once(RouteAuthorizer::new(settings), store, &request).await
    };

    let decision = outcome
        .decision()
        .copied()
        .context("navigation still pending after the registry settled")?;
    let redirect = match &outcome {
        GuardOutcome::Redirect { to, .. } => Some(to.as_str()),
        _ => None,
    };

    if request.json {
        let value = serde_json::json!({
            "path": request.path,
            "allowed": decision.allowed,
            "reason": decision.reason,
            "redirect": redirect,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match redirect {
            Some(to) => println!("{} {decision} -> {to}", request.path),
            None => println!("{} {decision}", request.path),
        }
    }

    if decision.allowed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DENIED))
    }
}

async fn guard_once<G: RouteGuard>(
    guard: G,
    store: RoleStore,
    request: &CheckRequest,
) -> GuardOutcome {
    let sessions = match request.session() {
        Some(session) => InMemorySessionProvider::with_session(session),
        None => InMemorySessionProvider::new(),
    };
    let navigator = Arc::new(RecordingNavigator::at(request.path.as_str()));
    let guard = NavigationGuard::new(guard, Arc::new(sessions), Arc::new(store), navigator);
    guard.resolve_current().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Option<&str>, user: Option<&str>) -> CheckRequest {
        CheckRequest {
            role: role.map(String::from),
            user: user.map(String::from),
            marketing: false,
            json: false,
            path: "/admin".into(),
        }
    }

    #[test]
    fn no_role_and_no_user_is_signed_out() {
        assert!(request(None, None).session().is_none());
    }

    #[test]
    fn role_only_uses_default_user() {
        let session = request(Some("kds"), None).session().expect("session");
        assert_eq!(session.username(), DEFAULT_USER);
        assert!(session.has_role("kds"));
    }

    #[test]
    fn user_only_has_no_role() {
        let session = request(None, Some("ana")).session().expect("session");
        assert!(session.role().is_none());
    }
}
