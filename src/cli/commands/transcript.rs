//! Transcript command handler

use super::{format_gpa, load};
use enrollment_rules::config::Config;
use enrollment_rules::core::models::{Catalog, Transcript};
use std::path::Path;

/// Print the student's transcript grouped by term, with GPA and passed courses.
///
/// # Errors
/// Returns a message if the file cannot be loaded
pub fn run(input_file: &Path, config: &Config) -> Result<(), String> {
    let request = load(input_file)?;
    let student = &request.student;
    let transcript = student.transcript();

    println!("\n=== Transcript for {} ({}) ===", student.name, student.id);
    if transcript.is_empty() {
        println!("\n(no records)");
    }
    for (term, records) in transcript.by_term() {
        println!("\n[{term}]");
        for record in records {
            println!(
                "  {:<10} {:<24} {:>2} units  {:>5.2}",
                record.course.id(),
                record.course.name(),
                record.course.units(),
                record.grade
            );
        }
    }

    let policy = config.rules.policy();
    let passed = passed_courses(&request.catalog, transcript, policy.passing_grade);

    println!("\nGPA: {}", format_gpa(transcript.gpa()));
    println!(
        "Passed ({}): {}",
        passed.len(),
        if passed.is_empty() { "-".to_string() } else { passed.join(", ") }
    );
    println!("Unit cap this term: {}", policy.max_units(transcript.gpa()));
    Ok(())
}

/// Names of passed catalog courses, with the attempt count for retakes
fn passed_courses(catalog: &Catalog, transcript: &Transcript, passing_grade: f64) -> Vec<String> {
    catalog
        .courses()
        .filter(|course| transcript.has_passed(course, passing_grade))
        .map(|course| match transcript.attempts(course).count() {
            1 => course.name().to_string(),
            attempts => format!("{} ({attempts} attempts)", course.name()),
        })
        .collect()
}
