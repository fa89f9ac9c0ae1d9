//! Roles file parsing.
//!
//! Two formats are accepted, picked by file extension:
//!
//! ```toml
//! # roles.toml
//! [[roles]]
//! id = "pizza-station"
//! name = "Pizza station"
//! permissions = ["/admin/kds/pizza"]
//! ```
//!
//! ```json
//! [{ "id": "admin", "name": "Admin", "permissions": ["*"] }]
//! ```
//!
//! JSON may also wrap the array as `{ "roles": [...] }`, which is how the
//! settings backend exports it.

use super::RegistryError;
use kiosk_auth::Role;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RolesDocument {
    #[serde(default)]
    roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRoles {
    Bare(Vec<Role>),
    Wrapped(RolesDocument),
}

/// Parses a roles document. The format is chosen from `path`'s extension:
/// `.json` is JSON, anything else is TOML.
///
/// # Errors
///
/// Returns [`RegistryError::ParseToml`] or [`RegistryError::ParseJson`].
pub fn parse_roles(path: &Path, content: &str) -> Result<Vec<Role>, RegistryError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let doc: JsonRoles =
            serde_json::from_str(content).map_err(|e| RegistryError::parse_json(path, e))?;
        Ok(match doc {
            JsonRoles::Bare(roles) => roles,
            JsonRoles::Wrapped(doc) => doc.roles,
        })
    } else {
        let doc: RolesDocument =
            toml::from_str(content).map_err(|e| RegistryError::parse_toml(path, e))?;
        Ok(doc.roles)
    }
}

/// Reads and parses a roles file.
///
/// No validation happens here: stored roles are tolerated as-is.
///
/// # Errors
///
/// Returns [`RegistryError`] if the file cannot be read or parsed.
pub async fn load_roles_file(path: &Path) -> Result<Vec<Role>, RegistryError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RegistryError::read_file(path, e))?;
    parse_roles(path, &content)
}
