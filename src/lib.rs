//! Library for `enrollment-rules`
//! Validates course enrollment requests against academic rules and records
//! accepted enrollments. Shared by the `enrollctl` CLI and its tests.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
