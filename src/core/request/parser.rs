//! TOML parser for enrollment request files
//!
//! ```toml
//! [[courses]]
//! id = "7"
//! name = "PROG"
//! units = 4
//!
//! [[courses]]
//! id = "2"
//! name = "AP"
//! units = 3
//! prerequisites = ["7"]
//!
//! [student]
//! id = "1"
//! name = "Bebe"
//!
//! [[transcript]]
//! term = "t1"
//! course = "7"
//! grade = 12.0
//!
//! [[offerings]]
//! course = "2"
//! section = 1
//! exam_time = "2025-01-20T09:00:00"
//! ```

use super::{EnrollmentRequest, LoadError};
use crate::core::models::{Catalog, Course, Offering, Student, Term};
use crate::debug;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Highest grade on the transcript scale
const MAX_GRADE: f64 = 20.0;

#[derive(Debug, Deserialize)]
struct RequestFile {
    #[serde(default)]
    courses: Vec<CourseEntry>,
    student: StudentEntry,
    #[serde(default)]
    transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    offerings: Vec<OfferingEntry>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    id: String,
    name: String,
    units: u32,
    #[serde(default)]
    prerequisites: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StudentEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    term: String,
    course: String,
    grade: f64,
}

#[derive(Debug, Deserialize)]
struct OfferingEntry {
    course: String,
    #[serde(default = "default_section")]
    section: u32,
    exam_time: NaiveDateTime,
}

const fn default_section() -> u32 {
    1
}

/// Load an enrollment request from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are invalid
/// (see [`parse_request`])
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<EnrollmentRequest, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_request(&content)
}

/// Parse an enrollment request from TOML text
///
/// # Errors
/// Returns an error if the TOML is malformed, a course id is declared twice,
/// a reference names an unknown course, prerequisites cannot be resolved
/// (missing or cyclic), a course has zero units, or a grade is outside 0-20.
pub fn parse_request(toml_str: &str) -> Result<EnrollmentRequest, LoadError> {
    let file: RequestFile = toml::from_str(toml_str)?;

    let catalog = build_catalog(file.courses)?;

    let mut student = Student::new(file.student.id, file.student.name);
    for entry in file.transcript {
        let course = lookup(&catalog, &entry.course, "transcript")?;
        if !entry.grade.is_finite() || !(0.0..=MAX_GRADE).contains(&entry.grade) {
            return Err(LoadError::InvalidGrade {
                course: entry.course,
                term: entry.term,
                grade: entry.grade,
            });
        }
        student.add_transcript_record(course, Term::new(entry.term), entry.grade);
    }

    let offerings = file
        .offerings
        .into_iter()
        .map(|entry| {
            let course = lookup(&catalog, &entry.course, "offerings")?;
            Ok(Offering::new(course, entry.section, entry.exam_time))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    debug!(
        "Parsed request: {} course(s), {} transcript record(s), {} offering(s)",
        catalog.len(),
        student.transcript().len(),
        offerings.len()
    );

    Ok(EnrollmentRequest {
        catalog,
        student,
        offerings,
    })
}

fn lookup(catalog: &Catalog, id: &str, section: &'static str) -> Result<Arc<Course>, LoadError> {
    catalog
        .get(id)
        .cloned()
        .ok_or_else(|| LoadError::UnknownCourse {
            section,
            id: id.to_string(),
        })
}

/// Build the catalog, adding each course once all its prerequisites exist.
///
/// Courses may list prerequisites declared later in the file, so entries
/// are added in passes until no further progress is made.
fn build_catalog(entries: Vec<CourseEntry>) -> Result<Catalog, LoadError> {
    let mut seen = HashSet::new();
    for entry in &entries {
        if entry.units == 0 {
            return Err(LoadError::InvalidUnits {
                course: entry.id.clone(),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(LoadError::DuplicateCourse(entry.id.clone()));
        }
    }

    let mut catalog = Catalog::new();
    let mut pending = entries;
    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();

        for entry in pending {
            if entry.prerequisites.iter().all(|p| catalog.contains(p)) {
                let prereqs: Vec<Arc<Course>> = entry
                    .prerequisites
                    .iter()
                    .filter_map(|p| catalog.get(p).cloned())
                    .collect();
                let course = Course::new(entry.id, entry.name, entry.units).with_prerequisites(prereqs);
                catalog.add_course(course);
            } else {
                deferred.push(entry);
            }
        }

        if deferred.len() == before {
            let mut unresolved: Vec<String> = deferred.into_iter().map(|e| e.id).collect();
            unresolved.sort();
            return Err(LoadError::UnresolvedPrerequisites(unresolved));
        }
        pending = deferred;
    }

    Ok(catalog)
}
