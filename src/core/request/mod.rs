//! Enrollment request files and committed enrollment records

pub mod parser;
pub mod record;

pub use parser::{load_request, parse_request};
pub use record::EnrollmentRecord;

use crate::core::models::{Catalog, Offering, Student};
use std::path::PathBuf;
use thiserror::Error;

/// One student's enrollment request, with the catalog it refers to
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    /// Courses referenced by the request
    pub catalog: Catalog,
    /// Requesting student, transcript included
    pub student: Student,
    /// Proposed offerings, in request order
    pub offerings: Vec<Offering>,
}

/// Errors raised while reading a request file
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the request layout
    #[error("invalid request file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two courses share an id
    #[error("course '{0}' is declared more than once")]
    DuplicateCourse(String),

    /// A transcript entry or offering names a course that is not declared
    #[error("[{section}] refers to unknown course '{id}'")]
    UnknownCourse {
        /// Request file section holding the reference
        section: &'static str,
        /// Unknown course id
        id: String,
    },

    /// Some courses have missing or cyclic prerequisites
    #[error("prerequisites could not be resolved for course(s): {}", .0.join(", "))]
    UnresolvedPrerequisites(Vec<String>),

    /// A course declares zero units
    #[error("course '{course}' must have a positive unit count")]
    InvalidUnits {
        /// Course id
        course: String,
    },

    /// A grade is outside the 0-20 scale
    #[error("grade {grade} for course '{course}' in term '{term}' is outside 0-20")]
    InvalidGrade {
        /// Course id
        course: String,
        /// Term label
        term: String,
        /// Rejected grade
        grade: f64,
    },
}
