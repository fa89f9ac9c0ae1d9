//! Route authorizers.
//!
//! # Architecture
//!
//! ```text
//! RouteGuard trait (THIS MODULE)     <- pure, no runtime deps
//!          │
//!          ├── RouteAuthorizer       <- admin section, rule list
//!          └── MarketingAuthorizer   <- marketing section, single role
//!          │
//!          └── NavigationGuard (kiosk-runtime) <- registry wait, redirect, diagnostics
//! ```
//!
//! Authorizers are pure functions of `(session, path, roles)`. They hold no
//! mutable state, so calling one twice with the same arguments always gives
//! the same decision.

use crate::decision::{AuthorizationDecision, DecisionReason};
use crate::role::Role;
use crate::rule::{Evaluation, Rule, ADMIN_RULES};
use crate::session::Session;
use crate::settings::AuthSettings;

/// A section guard: decides whether a session may reach a path.
///
/// # Example
///
/// ```
/// use kiosk_auth::{AuthorizationDecision, DecisionReason, Role, RouteGuard, Session};
///
/// struct OpenDoor;
///
/// impl RouteGuard for OpenDoor {
///     fn authorize(&self, _: Option<&Session>, _: &str, _: &[Role]) -> AuthorizationDecision {
///         AuthorizationDecision::from_reason(DecisionReason::Wildcard)
///     }
///
///     fn denial_redirect(&self, _: &AuthorizationDecision) -> Option<&str> {
///         None
///     }
/// }
///
/// assert!(OpenDoor.authorize(None, "/anything", &[]).allowed);
/// ```
pub trait RouteGuard: Send + Sync {
    /// Decides one navigation.
    fn authorize(
        &self,
        session: Option<&Session>,
        path: &str,
        roles: &[Role],
    ) -> AuthorizationDecision;

    /// Where a denied navigation should be sent. `None` for allowed decisions.
    fn denial_redirect(&self, decision: &AuthorizationDecision) -> Option<&str>;

    /// Decides using only the rules that do not read the role registry.
    ///
    /// Returns `None` when the registry is required. Callers use this while
    /// the registry is still loading: a `None` means "wait", never "deny".
    ///
    /// The default treats every decision as registry-dependent.
    fn decide_without_registry(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Option<AuthorizationDecision> {
        let _ = (session, path);
        None
    }
}

/// Admin-section authorizer.
///
/// Evaluates [`ADMIN_RULES`] in order; see [`crate::rule`] for the table.
///
/// # Example
///
/// ```
/// use kiosk_auth::{DecisionReason, Role, RouteAuthorizer, Session};
///
/// let authorizer = RouteAuthorizer::default();
/// let roles = vec![Role::new("pizza-station", "Pizza").with_permission("/admin/kds/pizza")];
/// let cook = Session::new("luca", Some("pizza-station"));
///
/// // Shared KDS chrome renders for station roles.
/// let d = authorizer.authorize(Some(&cook), "/admin/kds", &roles);
/// assert_eq!(d.reason, DecisionReason::PrefixMatch);
///
/// // Other admin pages do not.
/// let d = authorizer.authorize(Some(&cook), "/admin/settings", &roles);
/// assert_eq!(d.reason, DecisionReason::NoPermission);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteAuthorizer {
    settings: AuthSettings,
}

impl RouteAuthorizer {
    /// Creates an authorizer with custom settings.
    #[must_use]
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    #[must_use]
    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// The rule list, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &'static [Rule] {
        ADMIN_RULES
    }

    /// Decides one navigation.
    #[must_use]
    pub fn authorize(
        &self,
        session: Option<&Session>,
        path: &str,
        roles: &[Role],
    ) -> AuthorizationDecision {
        let mut eval = Evaluation::new(session, path, roles, &self.settings);
        ADMIN_RULES
            .iter()
            .find_map(|rule| rule.apply(&mut eval))
            .unwrap_or_else(|| AuthorizationDecision::from_reason(DecisionReason::NoPermission))
    }
}

impl RouteGuard for RouteAuthorizer {
    fn authorize(
        &self,
        session: Option<&Session>,
        path: &str,
        roles: &[Role],
    ) -> AuthorizationDecision {
        RouteAuthorizer::authorize(self, session, path, roles)
    }

    fn denial_redirect(&self, decision: &AuthorizationDecision) -> Option<&str> {
        decision
            .is_denied()
            .then_some(self.settings.sign_in_route.as_str())
    }

    fn decide_without_registry(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> Option<AuthorizationDecision> {
        let mut eval = Evaluation::new(session, path, &[], &self.settings);
        ADMIN_RULES
            .iter()
            .take_while(|rule| !rule.needs_registry())
            .find_map(|rule| rule.apply(&mut eval))
    }
}

/// Marketing-section authorizer.
///
/// A single-role check with no wildcard or prefix logic. It tells apart
/// "not signed in" (sent to sign-in) and "signed in with the wrong role"
/// (sent to the storefront root).
///
/// # Example
///
/// ```
/// use kiosk_auth::{DecisionReason, MarketingAuthorizer, RouteGuard, Session};
///
/// let guard = MarketingAuthorizer::default();
/// let admin = Session::new("ana", Some("admin"));
///
/// let d = guard.authorize(Some(&admin), "/marketing", &[]);
/// assert_eq!(d.reason, DecisionReason::RoleMismatch);
/// assert_eq!(guard.denial_redirect(&d), Some("/"));
///
/// let d = guard.authorize(None, "/marketing", &[]);
/// assert_eq!(guard.denial_redirect(&d), Some("/login"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketingAuthorizer {
    settings: AuthSettings,
}

impl MarketingAuthorizer {
    /// Creates an authorizer with custom settings.
    #[must_use]
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings }
    }

    fn decide(&self, session: Option<&Session>) -> AuthorizationDecision {
        let reason = match session {
            None => DecisionReason::Unauthenticated,
            Some(s) if s.has_role(self.settings.marketing_role.as_str()) => {
                DecisionReason::RoleMatch
            }
            Some(_) => DecisionReason::RoleMismatch,
        };
        AuthorizationDecision::from_reason(reason)
    }
}

impl RouteGuard for MarketingAuthorizer {
    fn authorize(
        &self,
        session: Option<&Session>,
        _path: &str,
        _roles: &[Role],
    ) -> AuthorizationDecision {
        self.decide(session)
    }

    fn denial_redirect(&self, decision: &AuthorizationDecision) -> Option<&str> {
        match decision.reason {
            _ if decision.allowed => None,
            DecisionReason::Unauthenticated => Some(self.settings.sign_in_route.as_str()),
            _ => Some(self.settings.storefront_route.as_str()),
        }
    }

    fn decide_without_registry(
        &self,
        session: Option<&Session>,
        _path: &str,
    ) -> Option<AuthorizationDecision> {
        Some(self.decide(session))
    }
}

/// Decides an admin navigation with default settings.
///
/// Shorthand for `RouteAuthorizer::default().authorize(..)`.
///
/// # Example
///
/// ```
/// use kiosk_auth::{authorize, DecisionReason, Session};
///
/// let root = Session::new("owner", Some("root"));
/// let d = authorize(Some(&root), "/admin/roles", &[]);
/// assert!(d.allowed);
/// assert_eq!(d.reason, DecisionReason::Superuser);
/// ```
#[must_use]
pub fn authorize(session: Option<&Session>, path: &str, roles: &[Role]) -> AuthorizationDecision {
    RouteAuthorizer::default().authorize(session, path, roles)
}
