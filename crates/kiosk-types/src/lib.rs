//! Core types for the kiosk operations console.
//!
//! This crate holds the identifiers that every other kiosk crate passes
//! around, and the [`ErrorCode`] convention their error enums follow.
//!
//! # Crate Architecture
//!
//! ```text
//! kiosk-types    : UserId, RoleId, ErrorCode   ◄── HERE
//!     ↑
//! kiosk-auth     : catalog, roles, session, authorizers, station filter
//!     ↑
//! kiosk-runtime  : role store, session provider, navigation guard, config
//!     ↑
//! kiosk-cli      : `kiosk` operator binary
//! ```
//!
//! # Example
//!
//! ```
//! use kiosk_types::{RoleId, UserId};
//!
//! let user = UserId::from_username("maria");
//! let role = RoleId::new("pizza-station");
//!
//! assert_eq!(user, UserId::from_username("maria"));
//! assert_eq!(role.as_str(), "pizza-station");
//! ```

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{RoleId, UserId};
