//! Configuration types.
//!
//! All types implement [`Default`]. Merging copies a field from the
//! overlay only when it differs from the default.

use kiosk_auth::AuthSettings;
use kiosk_types::RoleId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure, after merging all layers.
///
/// # Example
///
/// ```
/// use kiosk_runtime::config::KioskConfig;
///
/// let config = KioskConfig::from_toml(r#"
/// [auth]
/// sign_in_route = "/staff/sign-in"
///
/// [kds]
/// full_access_roles = ["root", "expo"]
/// "#).expect("valid config");
///
/// let settings = config.auth_settings();
/// assert_eq!(settings.sign_in_route, "/staff/sign-in");
/// assert!(settings.is_full_access_role("expo"));
/// assert!(!settings.is_full_access_role("kds"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KioskConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Well-known roles and routes.
    pub auth: AuthConfig,

    /// Kitchen display settings.
    pub kds: KdsConfig,

    /// Role registry source.
    pub roles: RolesConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl KioskConfig {
    /// Parses a TOML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the document is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    pub fn merge(&mut self, other: &Self) {
        if other.debug {
            self.debug = true;
        }
        self.auth.merge(&other.auth);
        self.kds.merge(&other.kds);
        self.roles.merge(&other.roles);
        self.logging.merge(&other.logging);
    }

    /// Builds the settings the authorizers consume.
    #[must_use]
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            superuser_role: RoleId::new(self.auth.superuser_role.as_str()),
            marketing_role: RoleId::new(self.auth.marketing_role.as_str()),
            kds_section_root: self.auth.kds_section_root.clone(),
            sign_in_route: self.auth.sign_in_route.clone(),
            storefront_route: self.auth.storefront_route.clone(),
            full_access_roles: self
                .kds
                .full_access_roles
                .iter()
                .map(|r| RoleId::new(r.as_str()))
                .collect(),
        }
    }
}

/// `[auth]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    pub superuser_role: String,
    pub marketing_role: String,
    pub kds_section_root: String,
    pub sign_in_route: String,
    pub storefront_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let settings = AuthSettings::default();
        Self {
            superuser_role: settings.superuser_role.as_str().to_string(),
            marketing_role: settings.marketing_role.as_str().to_string(),
            kds_section_root: settings.kds_section_root,
            sign_in_route: settings.sign_in_route,
            storefront_route: settings.storefront_route,
        }
    }
}

impl AuthConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.superuser_role != default.superuser_role {
            self.superuser_role = other.superuser_role.clone();
        }
        if other.marketing_role != default.marketing_role {
            self.marketing_role = other.marketing_role.clone();
        }
        if other.kds_section_root != default.kds_section_root {
            self.kds_section_root = other.kds_section_root.clone();
        }
        if other.sign_in_route != default.sign_in_route {
            self.sign_in_route = other.sign_in_route.clone();
        }
        if other.storefront_route != default.storefront_route {
            self.storefront_route = other.storefront_route.clone();
        }
    }
}

/// `[kds]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KdsConfig {
    /// Roles that see every station. Replaces the list, never appends.
    pub full_access_roles: Vec<String>,
}

impl Default for KdsConfig {
    fn default() -> Self {
        Self {
            full_access_roles: AuthSettings::default()
                .full_access_roles
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
        }
    }
}

impl KdsConfig {
    fn merge(&mut self, other: &Self) {
        if other.full_access_roles != Self::default().full_access_roles {
            self.full_access_roles = other.full_access_roles.clone();
        }
    }
}

/// `[roles]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RolesConfig {
    /// Roles file (TOML or JSON).
    pub file: Option<PathBuf>,
}

impl RolesConfig {
    fn merge(&mut self, other: &Self) {
        if other.file.is_some() {
            self.file = other.file.clone();
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when neither flags nor `RUST_LOG` set one.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    fn merge(&mut self, other: &Self) {
        if other.level != Self::default().level {
            self.level = other.level.clone();
        }
    }
}
