//! Check command handler

use super::{format_gpa, load};
use enrollment_rules::config::Config;
use enrollment_rules::core::enrollment::Validator;
use enrollment_rules::{info, verbose};
use std::path::Path;

/// Validate a request file without committing anything.
///
/// # Errors
/// Returns a message if the file cannot be loaded or a rule is violated
pub fn run(input_file: &Path, config: &Config) -> Result<(), String> {
    let request = load(input_file)?;
    let validator = Validator::new(config.rules.policy());

    verbose!(
        "Checking {} offering(s) for {} ({})",
        request.offerings.len(),
        request.student.name,
        request.student.id
    );
    for offering in &request.offerings {
        verbose!("  - {offering}");
    }

    match validator.check(&request.student, &request.offerings) {
        Ok(approval) => {
            info!(
                "Request {} accepted for student {}",
                input_file.display(),
                request.student.id
            );
            println!(
                "✓ Request is valid: {} unit(s) of {} allowed (GPA {})",
                approval.requested_units,
                approval.max_units,
                format_gpa(approval.gpa)
            );
            Ok(())
        }
        Err(violation) => Err(format!("✗ Request rejected [{}]: {violation}", violation.code())),
    }
}
