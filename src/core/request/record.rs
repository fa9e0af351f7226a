//! Committed enrollment record, written out by the CLI

use crate::core::enrollment::Committed;
use crate::core::models::Student;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A course section in a saved record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedSection {
    /// Course id
    pub course: String,
    /// Course name
    pub name: String,
    /// Section number
    pub section: u32,
    /// Course units
    pub units: u32,
}

/// The sections committed by one successful enrollment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// Student id
    pub student_id: String,
    /// Student name
    pub student_name: String,
    /// GPA used for the unit-load check, absent for new students
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    /// Units committed by this request
    pub requested_units: u32,
    /// Sections committed by this request, in request order
    pub sections: Vec<RecordedSection>,
}

impl EnrollmentRecord {
    /// Build a record of the sections in `committed`
    #[must_use]
    pub fn new(student: &Student, committed: &Committed) -> Self {
        Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            gpa: committed.approval.gpa,
            requested_units: committed.approval.requested_units,
            sections: committed
                .sections
                .iter()
                .map(|cs| RecordedSection {
                    course: cs.course.id().to_string(),
                    name: cs.course.name().to_string(),
                    section: cs.section,
                    units: cs.course.units(),
                })
                .collect(),
        }
    }

    /// Serialize the record to TOML and write it, creating parent directories
    ///
    /// # Errors
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
