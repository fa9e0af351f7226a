//! Course catalog

use super::Course;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The set of courses known to the registrar, indexed by course id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<String, Arc<Course>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: BTreeMap::new(),
        }
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// The shared course, or `None` if a course with the same id already exists
    pub fn add_course(&mut self, course: Course) -> Option<Arc<Course>> {
        if self.courses.contains_key(course.id()) {
            return None;
        }
        let course = Arc::new(course);
        self.courses
            .insert(course.id().to_string(), Arc::clone(&course));
        Some(course)
    }

    /// Get a course by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Course>> {
        self.courses.get(id)
    }

    /// Whether a course id is known
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    /// All courses, ordered by id
    pub fn courses(&self) -> impl Iterator<Item = &Arc<Course>> {
        self.courses.values()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut catalog = Catalog::new();
        let prog = catalog.add_course(Course::new("7", "PROG", 4)).unwrap();
        let ap = catalog
            .add_course(Course::new("2", "AP", 3).with_prerequisites([Arc::clone(&prog)]))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("7"));
        assert_eq!(catalog.get("2"), Some(&ap));
        assert_eq!(ap.prerequisites()[0].name(), "PROG");
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_course(Course::new("7", "PROG", 4)).is_some());
        assert!(catalog.add_course(Course::new("7", "Other", 2)).is_none());
        assert_eq!(catalog.get("7").unwrap().name(), "PROG");
    }
}
