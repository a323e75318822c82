//! Permission model shared by every client of the dashboard API.
//!
//! Tokens have the form `resource:action`, a requirement is a
//! [`PermissionConfig`] and [`evaluate`] decides it against the held
//! [`PermissionSet`]. [`SessionAccess`] binds a set to its [`Role`] and
//! resolves the [`AccessFlags`] used by navigation.

pub mod access;
pub mod capability;
pub mod config;
pub mod legacy;
pub mod permission;
pub mod resource;
pub mod role;
pub mod set;

pub use access::{AccessSource, SessionAccess};
pub use capability::{AccessFlags, Capability};
pub use config::{evaluate, PermissionConfig};
pub use legacy::LegacyRoleTable;
pub use permission::{Permission, PermissionParseError};
pub use resource::{Action, Resource};
pub use role::Role;
pub use set::PermissionSet;
