//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values
//! 2. Global config (`~/.kiosk/config.toml`)
//! 3. Project config (`<root>/.kiosk/config.toml`)
//! 4. Environment variables (`KIOSK_*`)
//!
//! Each layer overrides the previous.

use super::{default_config_path, ConfigError, KioskConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Log levels accepted by `KIOSK_LOG_LEVEL`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use kiosk_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/srv/kiosk")
///     .load()?;
/// # Ok::<(), kiosk_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.kiosk/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any config file exists but cannot be parsed,
    /// an environment variable holds an invalid value, or a merged route is
    /// not absolute.
    /// Missing config files are silently ignored.
    pub fn load(&self) -> Result<KioskConfig, ConfigError> {
        let mut config = KioskConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = Self::load_file(&global_path)? {
                debug!(path = %global_path.display(), "loaded global config");
                config.merge(&global_config);
            }
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(mut project_config) = Self::load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "loaded project config"
                    );
                    // A relative roles file is relative to the project root.
                    if let Some(file) = project_config.roles.file.take() {
                        project_config.roles.file = Some(project_root.join(file));
                    }
                    config.merge(&project_config);
                }
            }
        }

        if !self.skip_env {
            Self::apply_env_vars(&mut config)?;
        }

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &KioskConfig) -> Result<(), ConfigError> {
        let routes = [
            ("auth.kds_section_root", &config.auth.kds_section_root),
            ("auth.sign_in_route", &config.auth.sign_in_route),
            ("auth.storefront_route", &config.auth.storefront_route),
        ];
        for (field, route) in routes {
            if !route.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    field,
                    "expected an absolute route starting with '/'",
                ));
            }
        }
        // "/" would place every admin route inside the KDS section.
        if config.auth.kds_section_root == "/" {
            return Err(ConfigError::invalid_value(
                "auth.kds_section_root",
                "the section root must name a section below '/'",
            ));
        }
        Ok(())
    }

    fn load_file(path: &Path) -> Result<Option<KioskConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config =
            KioskConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    fn apply_env_vars(config: &mut KioskConfig) -> Result<(), ConfigError> {
        parse_env_bool!(config.debug, "KIOSK_DEBUG");

        if let Ok(val) = std::env::var("KIOSK_ROLES_FILE") {
            config.roles.file = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("KIOSK_SIGN_IN_ROUTE") {
            if !val.starts_with('/') {
                return Err(ConfigError::invalid_env_var(
                    "KIOSK_SIGN_IN_ROUTE",
                    "expected an absolute route starting with '/'",
                ));
            }
            config.auth.sign_in_route = val;
        }

        if let Ok(val) = std::env::var("KIOSK_LOG_LEVEL") {
            let level = val.to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::invalid_env_var(
                    "KIOSK_LOG_LEVEL",
                    format!("expected one of {}", LOG_LEVELS.join(", ")),
                ));
            }
            config.logging.level = level;
        }

        Ok(())
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
