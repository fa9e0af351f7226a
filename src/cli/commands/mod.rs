//! CLI command handlers for `enrollctl`.
//!
//! Each subcommand lives in its own module and returns `Err(message)` for
//! the entry point to print before exiting with status 1.

pub mod check;
pub mod config;
pub mod enroll;
pub mod transcript;

use enrollment_rules::core::request::{load_request, EnrollmentRequest};
use enrollment_rules::error;
use std::path::Path;

/// Load a request file, turning failures into a printable message
fn load(input_file: &Path) -> Result<EnrollmentRequest, String> {
    load_request(input_file).map_err(|e| {
        error!("Failed to load request {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })
}

/// Format a GPA for display
fn format_gpa(gpa: Option<f64>) -> String {
    gpa.map_or_else(|| "n/a".to_string(), |g| format!("{g:.2}"))
}
