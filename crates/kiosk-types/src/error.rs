//! Shared error conventions.
//!
//! Every error enum in the kiosk crates implements [`ErrorCode`] so that
//! logs, CLI output and any future HTTP layer report the same stable codes.
//!
//! # Example
//!
//! ```
//! use kiosk_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum RegistryError {
//!     Missing,
//!     Timeout,
//! }
//!
//! impl ErrorCode for RegistryError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing => "REGISTRY_MISSING",
//!             Self::Timeout => "REGISTRY_TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! let err = RegistryError::Timeout;
//! assert_eq!(err.code(), "REGISTRY_TIMEOUT");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, e.g. `"ROLE_UNKNOWN_PERMISSION"`
/// - **Prefixed by domain**: `ROLE_`, `REGISTRY_`, `CONFIG_`
/// - **Stable**: codes are an API contract once published
///
/// # Recoverability
///
/// An error is recoverable when retrying, or a corrective action by the
/// operator (fixing a file, reloading the page), may succeed.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the kiosk conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE. Intended for tests.
///
/// # Example
///
/// ```
/// use kiosk_types::{assert_error_code, ErrorCode};
///
/// struct Timeout;
///
/// impl ErrorCode for Timeout {
///     fn code(&self) -> &'static str { "NET_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Timeout, "NET_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Asserts [`assert_error_code`] for every error in the slice.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
