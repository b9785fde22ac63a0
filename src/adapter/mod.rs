//! Translate coarse policy toggles into permission grants on a fixed set of roles.
//!
//! Raw policy, role and permission-catalog documents are validated by
//! [`decode`], mapped through the static table in [`directives`] and folded
//! over the roles by [`engine`]. [`reconcile`] wires the steps together.

pub mod decode;
pub mod derive;
pub mod directives;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod reconcile;
pub mod types;
pub mod web;

pub use errors::AdapterError;
pub use reconcile::{reconcile, reconcile_with, reconcile_with_report, Outcome, ReconcileOptions, Retention};
pub use types::{Directive, Permission, Policy, PolicyKey, PolicyValue, Role, RoleName, Roles};
