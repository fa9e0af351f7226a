//! Offering model

use super::Course;
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// A course section on offer for the current term, with its final exam slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offering {
    /// Offered course
    pub course: Arc<Course>,
    /// Section number
    pub section: u32,
    /// Exam date and time
    pub exam_time: NaiveDateTime,
}

impl Offering {
    /// Create a new offering
    #[must_use]
    pub const fn new(course: Arc<Course>, section: u32, exam_time: NaiveDateTime) -> Self {
        Self {
            course,
            section,
            exam_time,
        }
    }

    /// Units of the offered course
    #[must_use]
    pub fn units(&self) -> u32 {
        self.course.units()
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (section {}, exam {})",
            self.course.name(),
            self.section,
            self.exam_time.format("%Y-%m-%d %H:%M")
        )
    }
}
