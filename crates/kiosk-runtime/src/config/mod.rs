//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────┐
//! │  1. Environment Variables (KIOSK_*)      │
//! ├──────────────────────────────────────────┤
//! │  2. Project Config (.kiosk/config.toml)  │
//! ├──────────────────────────────────────────┤
//! │  3. Global Config (~/.kiosk/config.toml) │
//! ├──────────────────────────────────────────┤
//! │  4. Default Values                       │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `KIOSK_DEBUG` | `debug` | bool |
//! | `KIOSK_ROLES_FILE` | `roles.file` | PathBuf |
//! | `KIOSK_SIGN_IN_ROUTE` | `auth.sign_in_route` | String |
//! | `KIOSK_LOG_LEVEL` | `logging.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.kiosk/config.toml
//! debug = false
//!
//! [auth]
//! superuser_role = "root"
//! marketing_role = "marketing"
//! sign_in_route = "/login"
//! storefront_route = "/"
//!
//! [kds]
//! full_access_roles = ["root", "admin", "kds"]
//!
//! [roles]
//! file = "roles.toml"
//!
//! [logging]
//! level = "warn"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{AuthConfig, KdsConfig, KioskConfig, LoggingConfig, RolesConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".kiosk")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".kiosk";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
