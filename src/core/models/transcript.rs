//! Transcript model
//!
//! A transcript is kept as one flat list of `(term, course, grade)` records.
//! Pass checks and GPA aggregate over every record, so a course retaken in a
//! later term contributes each attempt to the GPA and counts as passed once
//! any attempt reaches the passing grade.

use super::{Course, Term};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Grade at or above which a transcript entry counts as passed (0-20 scale)
pub const DEFAULT_PASSING_GRADE: f64 = 10.0;

/// A single graded attempt of a course in a term
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRecord {
    /// Term the course was taken in
    pub term: Term,
    /// Graded course
    pub course: Arc<Course>,
    /// Final grade
    pub grade: f64,
}

/// A student's academic history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    records: Vec<TranscriptRecord>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a grade, replacing any grade already recorded for the same
    /// `(term, course)` pair
    pub fn record(&mut self, term: Term, course: Arc<Course>, grade: f64) {
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|r| r.term == term && r.course == course)
        {
            existing.grade = grade;
        } else {
            self.records.push(TranscriptRecord {
                term,
                course,
                grade,
            });
        }
    }

    /// All records in insertion order
    #[must_use]
    pub fn records(&self) -> &[TranscriptRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the transcript has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any attempt of `course` reached `passing_grade`
    #[must_use]
    pub fn has_passed(&self, course: &Course, passing_grade: f64) -> bool {
        self.records
            .iter()
            .any(|r| *r.course == *course && r.grade >= passing_grade)
    }

    /// All attempts of a course, in insertion order
    pub fn attempts<'a>(&'a self, course: &'a Course) -> impl Iterator<Item = &'a TranscriptRecord> {
        self.records.iter().filter(move |r| *r.course == *course)
    }

    /// Unit-weighted grade average over every record
    ///
    /// # Returns
    /// `None` when the transcript holds no units (no records, or only
    /// zero-unit courses), since the average is undefined there.
    #[must_use]
    pub fn gpa(&self) -> Option<f64> {
        let (points, units) = self.records.iter().fold((0.0, 0.0), |(points, units), r| {
            let course_units = f64::from(r.course.units());
            (r.grade.mul_add(course_units, points), units + course_units)
        });

        (units > 0.0).then(|| points / units)
    }

    /// Records grouped by term, terms in sorted order
    #[must_use]
    pub fn by_term(&self) -> BTreeMap<&Term, Vec<&TranscriptRecord>> {
        let mut grouped: BTreeMap<&Term, Vec<&TranscriptRecord>> = BTreeMap::new();
        for record in &self.records {
            grouped.entry(&record.term).or_default().push(record);
        }
        grouped
    }
}
