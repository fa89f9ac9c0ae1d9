//! Shared E2E test helpers for `kiosk` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables that would leak the developer's environment into a test.
const KIOSK_ENV_VARS: &[&str] = &[
    "KIOSK_DEBUG",
    "KIOSK_ROLES_FILE",
    "KIOSK_SIGN_IN_ROUTE",
    "KIOSK_LOG_LEVEL",
    "RUST_LOG",
];

/// Roles fixture covering every rule of the admin guard.
pub const ROLES_TOML: &str = r#"
[[roles]]
id = "admin"
name = "Admin"
permissions = ["*"]

[[roles]]
id = "kds"
name = "Kitchen"
permissions = ["/admin/kds"]

[[roles]]
id = "pizza-station"
name = "Pizza"
permissions = ["/admin/kds/pizza"]

[[roles]]
id = "cashier"
name = "Cashier"
permissions = ["/admin/cashier"]
"#;

/// Build a Command for the `kiosk` binary isolated in a fresh project dir.
///
/// `HOME` points at the temp dir so no global config is picked up.
/// Returns (command, _guard); keep the guard alive for the test's duration.
pub fn kiosk_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("kiosk");
    cmd.timeout(TIMEOUT_BASIC);
    for var in KIOSK_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", tmp.path());
    cmd.args(["-C", tmp.path().to_str().expect("valid utf8")]);
    (cmd, tmp)
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(&path, content).expect("write fixture");
    path
}

/// Writes the standard roles fixture and returns its path as a string.
pub fn roles_fixture(dir: &Path) -> String {
    write_file(dir, "roles.toml", ROLES_TOML)
        .to_str()
        .expect("valid utf8")
        .to_string()
}
