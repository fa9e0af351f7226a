//! Enrollment validation
//!
//! A request is a list of offerings for one student. The validator walks the
//! list in order and, for each offering, checks:
//!
//! 1. the course has not already been passed,
//! 2. every prerequisite has been passed,
//! 3. no other offering shares its exam time,
//! 4. no other offering is for the same course.
//!
//! Once every offering clears those checks, the total unit load is checked
//! against the cap for the student's GPA. The first failed check rejects the
//! whole request; nothing is committed unless all of them pass.

pub mod policy;
pub mod violation;

pub use policy::{EnrollmentPolicy, UnitTier};
pub use violation::RuleViolation;

use crate::core::models::{CourseSection, Offering, Student};
use crate::{debug, info, warn};

/// Outcome of a successful dry-run check
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    /// Total units requested
    pub requested_units: u32,
    /// Student GPA at the time of the check
    pub gpa: Option<f64>,
    /// Unit cap that applied
    pub max_units: u32,
}

/// Outcome of a committed enrollment
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    /// Sections appended to the student's current term, in request order
    pub sections: Vec<CourseSection>,
    /// Figures the unit-load check used
    pub approval: Approval,
}

/// Checks enrollment requests against an [`EnrollmentPolicy`]
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: EnrollmentPolicy,
}

impl Validator {
    /// Create a validator with the given policy
    #[must_use]
    pub const fn new(policy: EnrollmentPolicy) -> Self {
        Self { policy }
    }

    /// Validate a request without committing it
    ///
    /// # Errors
    /// Returns the first [`RuleViolation`] found, in check order.
    pub fn check(&self, student: &Student, offerings: &[Offering]) -> Result<Approval, RuleViolation> {
        debug!(
            "Checking {} offering(s) for student {} ({})",
            offerings.len(),
            student.id,
            student.name
        );

        for (idx, offering) in offerings.iter().enumerate() {
            self.check_not_passed(student, offering)?;
            self.check_prerequisites(student, offering)?;
            check_exam_time(offerings, idx)?;
            check_duplicate_course(offerings, idx)?;
        }

        self.check_units_limit(student, offerings)
    }

    /// Validate a request and, if every rule holds, append its offerings to
    /// the student's current term.
    ///
    /// # Errors
    /// Returns the first [`RuleViolation`] found. The student is left
    /// untouched in that case.
    pub fn enroll(&self, student: &mut Student, offerings: &[Offering]) -> Result<Committed, RuleViolation> {
        let approval = match self.check(student, offerings) {
            Ok(approval) => approval,
            Err(violation) => {
                warn!(
                    "Enrollment rejected for student {} [{}]: {violation}",
                    student.id,
                    violation.code()
                );
                return Err(violation);
            }
        };

        let first_new = student.current_term().len();
        student.submit_enrollment(offerings);
        let sections = student.current_term()[first_new..].to_vec();

        info!(
            "Enrolled student {} in {} course(s), {} unit(s)",
            student.id,
            sections.len(),
            approval.requested_units
        );

        Ok(Committed { sections, approval })
    }

    fn check_not_passed(&self, student: &Student, offering: &Offering) -> Result<(), RuleViolation> {
        if student
            .transcript()
            .has_passed(&offering.course, self.policy.passing_grade)
        {
            return Err(RuleViolation::AlreadyPassed {
                course: offering.course.clone(),
            });
        }
        Ok(())
    }

    fn check_prerequisites(&self, student: &Student, offering: &Offering) -> Result<(), RuleViolation> {
        let transcript = student.transcript();
        match offering
            .course
            .prerequisites()
            .iter()
            .find(|prereq| !transcript.has_passed(prereq, self.policy.passing_grade))
        {
            Some(prereq) => Err(RuleViolation::PrerequisiteNotPassed {
                prerequisite: prereq.clone(),
                course: offering.course.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_units_limit(&self, student: &Student, offerings: &[Offering]) -> Result<Approval, RuleViolation> {
        // Saturates so an oversized load still exceeds every cap
        let requested_units = offerings
            .iter()
            .fold(0u32, |total, offering| total.saturating_add(offering.units()));
        let gpa = student.transcript().gpa();
        let max_units = self.policy.max_units(gpa);

        debug!("Unit load {requested_units} against cap {max_units} (GPA {gpa:?})");

        if requested_units > max_units {
            return Err(RuleViolation::UnitLimitExceeded {
                requested_units,
                gpa,
                max_units,
            });
        }

        Ok(Approval {
            requested_units,
            gpa,
            max_units,
        })
    }
}

fn check_exam_time(offerings: &[Offering], idx: usize) -> Result<(), RuleViolation> {
    let offering = &offerings[idx];
    match offerings
        .iter()
        .enumerate()
        .find(|(other_idx, other)| *other_idx != idx && other.exam_time == offering.exam_time)
    {
        Some((_, other)) => Err(RuleViolation::ExamTimeConflict {
            first: offering.clone(),
            second: other.clone(),
        }),
        None => Ok(()),
    }
}

fn check_duplicate_course(offerings: &[Offering], idx: usize) -> Result<(), RuleViolation> {
    let offering = &offerings[idx];
    if offerings
        .iter()
        .enumerate()
        .any(|(other_idx, other)| other_idx != idx && other.course == offering.course)
    {
        return Err(RuleViolation::DuplicateCourse {
            course: offering.course.clone(),
        });
    }
    Ok(())
}
