//! Core module: domain models, the enrollment validator, configuration and
//! request files

pub mod config;
pub mod enrollment;
pub mod models;
pub mod request;

/// Returns the current version of the `enrollment-rules` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
