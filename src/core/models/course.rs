//! Course model

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents a course that can be offered and recorded on a transcript.
///
/// Courses are immutable once built and are shared as `Arc<Course>` between
/// the catalog, transcripts and offerings. Two courses are equal when their
/// identifiers match.
#[derive(Debug, Clone)]
pub struct Course {
    id: String,
    name: String,
    units: u32,
    prerequisites: Vec<Arc<Course>>,
}

impl Course {
    /// Create a new course without prerequisites
    ///
    /// # Arguments
    /// * `id` - Catalog identifier (e.g., "4")
    /// * `name` - Display name (e.g., "MATH1")
    /// * `units` - Unit count. Request files reject zero; a zero-unit course
    ///   built here adds nothing to a unit load or to GPA weighting.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, units: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            units,
            prerequisites: Vec::new(),
        }
    }

    /// Attach prerequisites, consuming the course.
    ///
    /// Prerequisites already present (by id) are not added twice.
    #[must_use]
    pub fn with_prerequisites<I>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = Arc<Self>>,
    {
        for prereq in prerequisites {
            if !self.prerequisites.contains(&prereq) {
                self.prerequisites.push(prereq);
            }
        }
        self
    }

    /// Catalog identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit count
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.units
    }

    /// Prerequisites in declaration order
    #[must_use]
    pub fn prerequisites(&self) -> &[Arc<Self>] {
        &self.prerequisites
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
