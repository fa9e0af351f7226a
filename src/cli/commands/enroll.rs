//! Enroll command handler

use super::{format_gpa, load};
use enrollment_rules::config::Config;
use enrollment_rules::core::enrollment::Validator;
use enrollment_rules::core::request::EnrollmentRecord;
use enrollment_rules::{error, info};
use std::path::{Path, PathBuf};

/// Validate a request file and, if accepted, commit it and write the record.
///
/// # Arguments
/// * `input_file` - Request TOML file
/// * `output_file` - Record path; defaults to `records_dir/<student id>.toml`
/// * `config` - Configuration holding rule thresholds and `records_dir`
/// * `verbose` - Whether to list committed sections
///
/// # Errors
/// Returns a message if the file cannot be loaded, a rule is violated or the
/// record cannot be written
pub fn run(input_file: &Path, output_file: Option<&Path>, config: &Config, verbose: bool) -> Result<(), String> {
    let mut request = load(input_file)?;
    let validator = Validator::new(config.rules.policy());

    let committed = validator
        .enroll(&mut request.student, &request.offerings)
        .map_err(|violation| format!("✗ Enrollment rejected [{}]: {violation}", violation.code()))?;

    let record = EnrollmentRecord::new(&request.student, &committed);
    let output_path = output_file.map_or_else(
        || PathBuf::from(&config.paths.records_dir).join(format!("{}.toml", request.student.id)),
        Path::to_path_buf,
    );

    record.save(&output_path).map_err(|e| {
        error!("Failed to write record {}: {e}", output_path.display());
        format!("✗ Failed to write record to {}: {e}", output_path.display())
    })?;
    info!("Enrollment record written to {}", output_path.display());

    println!(
        "✓ Enrolled {} in {} course(s), {} unit(s) (GPA {})",
        request.student.name,
        committed.sections.len(),
        committed.approval.requested_units,
        format_gpa(committed.approval.gpa)
    );
    if verbose {
        for section in &committed.sections {
            println!(
                "  - {} {} (section {}, {} units)",
                section.course.id(),
                section.course.name(),
                section.section,
                section.course.units()
            );
        }
    }
    println!("✓ Record saved to: {}", output_path.display());
    Ok(())
}
