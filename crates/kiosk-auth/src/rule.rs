//! The admin authorization rule list.
//!
//! Rules are evaluated in [`ADMIN_RULES`] order; the first rule that
//! produces a decision wins. If none does, the navigation is denied with
//! [`DecisionReason::NoPermission`].
//!
//! ```text
//! RequireSession   ─ no session           → deny  UNAUTHENTICATED
//! SuperuserBypass  ─ role == superuser    → allow SUPERUSER
//! ───────────────── registry needed below this line ─────────────────
//! RequireRoles     ─ registry empty       → deny  ROLES_UNAVAILABLE
//! ResolveRole      ─ role id not found    → deny  ROLE_NOT_FOUND
//! Wildcard         ─ role holds "*"       → allow WILDCARD
//! DirectMatch      ─ role holds path      → allow DIRECT_MATCH
//! SectionPrefix    ─ both under KDS root  → allow PREFIX_MATCH
//! (fallthrough)                           → deny  NO_PERMISSION
//! ```

use crate::decision::{AuthorizationDecision, DecisionReason};
use crate::permission::is_under;
use crate::role::{find_role, Role};
use crate::session::Session;
use crate::settings::AuthSettings;

/// One step of the admin rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Deny when there is no session.
    RequireSession,
    /// Allow the superuser role unconditionally.
    SuperuserBypass,
    /// Deny when the registry holds no roles (fail closed).
    RequireRoles,
    /// Deny when the session's role is not in the registry.
    ResolveRole,
    /// Allow roles holding the wildcard.
    Wildcard,
    /// Allow roles granting the exact path.
    DirectMatch,
    /// Allow section chrome for roles holding any sub-path of the KDS root.
    SectionPrefix,
}

/// The admin rule list, in evaluation order.
pub const ADMIN_RULES: &[Rule] = &[
    Rule::RequireSession,
    Rule::SuperuserBypass,
    Rule::RequireRoles,
    Rule::ResolveRole,
    Rule::Wildcard,
    Rule::DirectMatch,
    Rule::SectionPrefix,
];

impl Rule {
    /// Returns `true` if the rule reads the role registry.
    ///
    /// Rules that do not may run while the registry is still loading.
    #[must_use]
    pub fn needs_registry(self) -> bool {
        !matches!(self, Self::RequireSession | Self::SuperuserBypass)
    }

    /// Returns the reason this rule yields when it decides.
    #[must_use]
    pub fn reason(self) -> DecisionReason {
        match self {
            Self::RequireSession => DecisionReason::Unauthenticated,
            Self::SuperuserBypass => DecisionReason::Superuser,
            Self::RequireRoles => DecisionReason::RolesUnavailable,
            Self::ResolveRole => DecisionReason::RoleNotFound,
            Self::Wildcard => DecisionReason::Wildcard,
            Self::DirectMatch => DecisionReason::DirectMatch,
            Self::SectionPrefix => DecisionReason::PrefixMatch,
        }
    }

    /// Applies the rule. `None` means "no opinion, continue".
    pub(crate) fn apply<'a>(self, eval: &mut Evaluation<'a>) -> Option<AuthorizationDecision> {
        let fires = match self {
            Self::RequireSession => eval.session.is_none(),
            Self::SuperuserBypass => eval
                .session
                .is_some_and(|s| s.has_role(eval.settings.superuser_role.as_str())),
            Self::RequireRoles => eval.roles.is_empty(),
            Self::ResolveRole => {
                eval.role = eval
                    .session
                    .and_then(Session::role)
                    .and_then(|id| find_role(eval.roles, id));
                eval.role.is_none()
            }
            Self::Wildcard => eval.role.is_some_and(Role::has_wildcard),
            Self::DirectMatch => eval.role.is_some_and(|r| r.grants(eval.path)),
            Self::SectionPrefix => {
                let root = eval.settings.kds_section_root.as_str();
                is_under(eval.path, root) && eval.role.is_some_and(|r| r.grants_any_under(root))
            }
        };

        fires.then(|| AuthorizationDecision::from_reason(self.reason()))
    }
}

/// Mutable state threaded through one rule-list evaluation.
pub(crate) struct Evaluation<'a> {
    pub(crate) session: Option<&'a Session>,
    pub(crate) path: &'a str,
    pub(crate) roles: &'a [Role],
    pub(crate) settings: &'a AuthSettings,
    /// Set by [`Rule::ResolveRole`].
    pub(crate) role: Option<&'a Role>,
}

impl<'a> Evaluation<'a> {
    pub(crate) fn new(
        session: Option<&'a Session>,
        path: &'a str,
        roles: &'a [Role],
        settings: &'a AuthSettings,
    ) -> Self {
        Self {
            session,
            path,
            roles,
            settings,
            role: None,
        }
    }
}
