//! Data models for enrollment validation

pub mod catalog;
pub mod course;
pub mod offering;
pub mod student;
pub mod term;
pub mod transcript;

pub use catalog::Catalog;
pub use course::Course;
pub use offering::Offering;
pub use student::{CourseSection, Student};
pub use term::Term;
pub use transcript::{Transcript, TranscriptRecord, DEFAULT_PASSING_GRADE};
