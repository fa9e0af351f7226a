//! Enrollment rule violations

use crate::core::models::{Course, Offering};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Display wrapper for an optional GPA
struct GpaDisplay(Option<f64>);

impl fmt::Display for GpaDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(gpa) => write!(f, "{gpa:.2}"),
            None => f.write_str("n/a (no transcript records)"),
        }
    }
}

/// The first rule an enrollment request broke
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleViolation {
    /// The requested course already has a passing grade on the transcript
    #[error("The student has already passed {course}")]
    AlreadyPassed {
        /// Requested course
        course: Arc<Course>,
    },

    /// A prerequisite of the requested course has not been passed
    #[error("The student has not passed {prerequisite} as a prerequisite of {course}")]
    PrerequisiteNotPassed {
        /// Missing prerequisite
        prerequisite: Arc<Course>,
        /// Requested course
        course: Arc<Course>,
    },

    /// Two requested offerings share an exam slot
    #[error("Two offerings {first} and {second} have the same exam time")]
    ExamTimeConflict {
        /// Offering being checked
        first: Offering,
        /// Conflicting offering
        second: Offering,
    },

    /// The same course was requested more than once
    #[error("{course} is requested to be taken twice")]
    DuplicateCourse {
        /// Repeated course
        course: Arc<Course>,
    },

    /// The requested load exceeds what the student's GPA allows
    #[error(
        "Number of units ({requested_units}) requested does not match GPA of {} (maximum {max_units})",
        GpaDisplay(*gpa)
    )]
    UnitLimitExceeded {
        /// Total units requested
        requested_units: u32,
        /// Student GPA, `None` for an empty transcript
        gpa: Option<f64>,
        /// Largest load allowed for this GPA
        max_units: u32,
    },
}

impl RuleViolation {
    /// Stable short code for logs and CLI output
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AlreadyPassed { .. } => "already-passed",
            Self::PrerequisiteNotPassed { .. } => "prerequisite-not-passed",
            Self::ExamTimeConflict { .. } => "exam-time-conflict",
            Self::DuplicateCourse { .. } => "duplicate-course",
            Self::UnitLimitExceeded { .. } => "unit-limit-exceeded",
        }
    }
}
