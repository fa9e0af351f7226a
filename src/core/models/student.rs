//! Student model

use super::{Course, Offering, Term, Transcript};
use std::fmt;
use std::sync::Arc;

/// A course section the student is enrolled in for the current term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSection {
    /// Enrolled course
    pub course: Arc<Course>,
    /// Section number
    pub section: u32,
}

/// Represents a student with an academic history and a current-term load
#[derive(Debug, Clone)]
pub struct Student {
    /// Student identifier
    pub id: String,

    /// Student name
    pub name: String,

    transcript: Transcript,

    current_term: Vec<CourseSection>,
}

impl Student {
    /// Create a new student with an empty transcript and no current enrollment
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transcript: Transcript::new(),
            current_term: Vec::new(),
        }
    }

    /// Add a graded course to the transcript
    pub fn add_transcript_record(&mut self, course: Arc<Course>, term: Term, grade: f64) {
        self.transcript.record(term, course, grade);
    }

    /// The student's transcript
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Course sections committed for the current term
    #[must_use]
    pub fn current_term(&self) -> &[CourseSection] {
        &self.current_term
    }

    /// Whether every given course is in the current-term enrollment
    #[must_use]
    pub fn has_taken(&self, courses: &[&Arc<Course>]) -> bool {
        courses
            .iter()
            .all(|course| self.current_term.iter().any(|cs| cs.course == **course))
    }

    /// Append offerings to the current term in the order given.
    ///
    /// Only the enrollment validator calls this, after every rule passed.
    pub(crate) fn submit_enrollment(&mut self, offerings: &[Offering]) {
        self.current_term
            .extend(offerings.iter().map(|o| CourseSection {
                course: Arc::clone(&o.course),
                section: o.section,
            }));
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_student_is_empty() {
        let student = Student::new("1", "Bebe");
        assert_eq!(student.to_string(), "Bebe");
        assert!(student.transcript().is_empty());
        assert!(student.current_term().is_empty());
        assert!(student.has_taken(&[]));
    }

    #[test]
    fn test_submit_enrollment_keeps_order() {
        let math1 = Arc::new(Course::new("4", "MATH1", 3));
        let prog = Arc::new(Course::new("7", "PROG", 4));
        let exam = NaiveDate::from_ymd_opt(2025, 1, 20)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();

        let mut student = Student::new("1", "Bebe");
        student.submit_enrollment(&[
            Offering::new(Arc::clone(&prog), 2, exam),
            Offering::new(Arc::clone(&math1), 1, exam),
        ]);

        let taken: Vec<(&str, u32)> = student
            .current_term()
            .iter()
            .map(|cs| (cs.course.name(), cs.section))
            .collect();
        assert_eq!(taken, vec![("PROG", 2), ("MATH1", 1)]);
        assert!(student.has_taken(&[&math1, &prog]));
    }
}
