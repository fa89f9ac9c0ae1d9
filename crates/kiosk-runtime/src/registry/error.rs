//! Role registry errors.

use kiosk_auth::RoleError;
use kiosk_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or editing the role registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Failed to read the roles file.
    #[error("failed to read roles file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Roles file is not valid TOML.
    #[error("failed to parse roles file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Roles file is not valid JSON.
    #[error("failed to parse roles file '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A role was rejected on write.
    #[error(transparent)]
    Invalid(#[from] RoleError),

    /// The registry has not finished loading.
    #[error("role registry is still loading")]
    NotReady,

    /// The one-shot load failed; the registry stays empty until rebuilt.
    #[error("role registry failed to load: {0}")]
    LoadFailed(String),
}

impl RegistryError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a TOML parse error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON parse error.
    pub fn parse_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseJson {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "REGISTRY_READ_FAILED",
            Self::ParseToml { .. } | Self::ParseJson { .. } => "REGISTRY_PARSE_FAILED",
            Self::Invalid(_) => "REGISTRY_INVALID_ROLE",
            Self::NotReady => "REGISTRY_NOT_READY",
            Self::LoadFailed(_) => "REGISTRY_LOAD_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A failed load is terminal for this store; everything else can be
        // fixed by the operator or by waiting.
        !matches!(self, Self::LoadFailed(_))
    }
}
