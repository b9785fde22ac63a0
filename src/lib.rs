//! policy-roles - policy to role-permission adapter
//!
//! Maps a handful of boolean administrative policy settings onto permission
//! grants for the built-in system and team roles.

pub mod adapter;
pub mod errors;
pub mod settings;
pub mod web;
