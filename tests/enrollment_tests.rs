//! Integration tests for enrollment validation

use chrono::{Duration, NaiveDate, NaiveDateTime};
use enrollment_rules::core::enrollment::{RuleViolation, Validator};
use enrollment_rules::core::models::{Course, Offering, Student, Term};
use std::sync::Arc;

/// Courses shared by every scenario
struct Courses {
    math1: Arc<Course>,
    phys1: Arc<Course>,
    prog: Arc<Course>,
    math2: Arc<Course>,
    phys2: Arc<Course>,
    ap: Arc<Course>,
    dm: Arc<Course>,
    economy: Arc<Course>,
    maaref: Arc<Course>,
    farsi: Arc<Course>,
    english: Arc<Course>,
    akhlagh: Arc<Course>,
    karafarini: Arc<Course>,
    stats: Arc<Course>,
}

fn courses() -> Courses {
    let math1 = Arc::new(Course::new("4", "MATH1", 3));
    let phys1 = Arc::new(Course::new("8", "PHYS1", 3));
    let prog = Arc::new(Course::new("7", "PROG", 4));
    Courses {
        math2: Arc::new(Course::new("6", "MATH2", 3).with_prerequisites([Arc::clone(&math1)])),
        phys2: Arc::new(
            Course::new("9", "PHYS2", 3).with_prerequisites([Arc::clone(&math1), Arc::clone(&phys1)]),
        ),
        ap: Arc::new(Course::new("2", "AP", 3).with_prerequisites([Arc::clone(&prog)])),
        dm: Arc::new(Course::new("3", "DM", 3).with_prerequisites([Arc::clone(&prog)])),
        economy: Arc::new(Course::new("1", "ECO", 3)),
        maaref: Arc::new(Course::new("5", "MAAREF", 2)),
        farsi: Arc::new(Course::new("12", "FA", 2)),
        english: Arc::new(Course::new("10", "EN", 2)),
        akhlagh: Arc::new(Course::new("11", "AKHLAGH", 2)),
        karafarini: Arc::new(Course::new("13", "KAR", 3)),
        stats: Arc::new(Course::new("14", "STAT", 3)),
        math1,
        phys1,
        prog,
    }
}

fn exam_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 20)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid exam time")
}

/// One section-1 offering per course, exams on consecutive days
fn requested_offerings(courses: &[&Arc<Course>]) -> Vec<Offering> {
    courses
        .iter()
        .zip(1..)
        .map(|(course, day)| Offering::new(Arc::clone(course), 1, exam_start() + Duration::days(day)))
        .collect()
}

fn record(student: &mut Student, term: &str, grades: &[(&Arc<Course>, f64)]) {
    for (course, grade) in grades {
        student.add_transcript_record(Arc::clone(course), Term::new(term), *grade);
    }
}

/// Student with a first term that leaves MATH1 failed
fn student_with_failed_math1(c: &Courses) -> Student {
    let mut bebe = Student::new("1", "Bebe");
    record(&mut bebe, "t1", &[(&c.phys1, 18.0), (&c.prog, 12.0), (&c.math1, 8.4)]);
    bebe
}

/// Student whose second term passes MATH1 on retake
fn student_with_two_terms(c: &Courses) -> Student {
    let mut bebe = student_with_failed_math1(c);
    record(&mut bebe, "t2", &[(&c.phys2, 10.0), (&c.ap, 16.0), (&c.math1, 10.5)]);
    bebe
}

/// Student with PHYS1, PROG and MATH1 graded as given
fn student_with_grades(c: &Courses, phys1: f64, prog: f64, math1: f64) -> Student {
    let mut bebe = Student::new("1", "Bebe");
    record(&mut bebe, "t1", &[(&c.phys1, phys1), (&c.prog, prog), (&c.math1, math1)]);
    bebe
}

fn assert_unit_limit(result: Result<impl std::fmt::Debug, RuleViolation>, units: u32) {
    match result {
        Err(RuleViolation::UnitLimitExceeded { requested_units, .. }) => assert_eq!(requested_units, units),
        other => panic!("expected unit limit violation, got {other:?}"),
    }
}

#[test]
fn can_take_basic_courses_in_first_term() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");

    let committed = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.math1, &c.phys1, &c.prog]))
        .expect("first-term courses have no prerequisites");

    assert_eq!(committed.approval.requested_units, 10);
    assert_eq!(committed.approval.gpa, None);
    assert!(bebe.has_taken(&[&c.math1, &c.phys1, &c.prog]));
}

#[test]
fn can_take_no_offerings() {
    let mut bebe = student_with_two_terms(&courses());

    let committed = Validator::default()
        .enroll(&mut bebe, &[])
        .expect("empty request is always accepted");

    assert!(committed.sections.is_empty());
    assert_eq!(committed.approval.requested_units, 0);
    assert!(bebe.current_term().is_empty());
}

#[test]
fn cannot_take_without_prerequisite_taken() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");

    let err = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.math2, &c.phys1, &c.prog]))
        .unwrap_err();

    assert_eq!(
        err,
        RuleViolation::PrerequisiteNotPassed {
            prerequisite: Arc::clone(&c.math1),
            course: Arc::clone(&c.math2),
        }
    );
    assert!(bebe.current_term().is_empty());
}

#[test]
fn cannot_take_without_prerequisite_passed() {
    let c = courses();
    let mut bebe = student_with_failed_math1(&c);

    let err = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.math2, &c.ap]))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The student has not passed MATH1 as a prerequisite of MATH2"
    );
    assert!(bebe.current_term().is_empty());
}

#[test]
fn cannot_take_ap_without_prog() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");
    record(&mut bebe, "t1", &[(&c.prog, 7.0)]);

    let err = Validator::default()
        .check(&bebe, &requested_offerings(&[&c.ap]))
        .unwrap_err();

    assert!(matches!(
        err,
        RuleViolation::PrerequisiteNotPassed { ref prerequisite, ref course }
            if prerequisite.name() == "PROG" && course.name() == "AP"
    ));
}

#[test]
fn can_take_with_prerequisite_finally_passed() {
    let c = courses();
    let mut bebe = student_with_two_terms(&c);

    Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.math2, &c.dm]))
        .expect("MATH1 was passed on retake");

    assert!(bebe.has_taken(&[&c.math2, &c.dm]));
}

#[test]
fn cannot_take_course_passed_on_retake() {
    let c = courses();
    let mut bebe = student_with_two_terms(&c);

    let err = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.math1, &c.dm]))
        .unwrap_err();

    assert_eq!(
        err,
        RuleViolation::AlreadyPassed {
            course: Arc::clone(&c.math1)
        }
    );
    assert_eq!(err.to_string(), "The student has already passed MATH1");
}

#[test]
fn cannot_take_course_passed_first_time() {
    let c = courses();
    let mut bebe = student_with_two_terms(&c);

    let err = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.phys1, &c.dm]))
        .unwrap_err();

    assert_eq!(err.code(), "already-passed");
    assert!(bebe.current_term().is_empty());
}

#[test]
fn cannot_take_course_passed_with_grade_twelve() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");
    record(&mut bebe, "t1", &[(&c.math1, 12.0)]);

    let err = Validator::default()
        .check(&bebe, &requested_offerings(&[&c.math1]))
        .unwrap_err();

    assert!(matches!(err, RuleViolation::AlreadyPassed { .. }));
}

#[test]
fn cannot_take_offerings_with_same_exam_time() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");
    let exam = exam_start();
    let offerings = vec![
        Offering::new(Arc::clone(&c.phys1), 1, exam),
        Offering::new(Arc::clone(&c.math1), 1, exam),
        Offering::new(Arc::clone(&c.phys1), 1, exam),
    ];

    let err = Validator::default().enroll(&mut bebe, &offerings).unwrap_err();

    match err {
        RuleViolation::ExamTimeConflict { first, second } => {
            assert_eq!(first, offerings[0]);
            assert_eq!(second, offerings[1]);
        }
        other => panic!("expected exam time conflict, got {other:?}"),
    }
    assert!(bebe.current_term().is_empty());
}

#[test]
fn exam_conflict_ignores_course_identity() {
    let c = courses();
    let exam = exam_start();
    let offerings = vec![
        Offering::new(Arc::clone(&c.economy), 1, exam + Duration::days(3)),
        Offering::new(Arc::clone(&c.farsi), 2, exam + Duration::days(1)),
        Offering::new(Arc::clone(&c.english), 1, exam + Duration::days(3)),
    ];

    let err = Validator::default()
        .check(&Student::new("1", "Bebe"), &offerings)
        .unwrap_err();

    assert_eq!(err.code(), "exam-time-conflict");
}

#[test]
fn cannot_take_a_course_twice() {
    let c = courses();
    let mut bebe = Student::new("1", "Bebe");

    let err = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&[&c.phys1, &c.dm, &c.phys1]))
        .unwrap_err();

    assert_eq!(
        err,
        RuleViolation::DuplicateCourse {
            course: Arc::clone(&c.phys1)
        }
    );
}

#[test]
fn cannot_take_two_sections_of_one_course() {
    let c = courses();
    let exam = exam_start();
    let offerings = vec![
        Offering::new(Arc::clone(&c.economy), 1, exam),
        Offering::new(Arc::clone(&c.economy), 2, exam + Duration::hours(4)),
    ];

    let err = Validator::default()
        .check(&Student::new("1", "Bebe"), &offerings)
        .unwrap_err();

    assert_eq!(err.to_string(), "ECO is requested to be taken twice");
}

#[test]
fn can_take_14_with_gpa_11() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 13.0, 11.0, 9.0);
    let request = [&c.dm, &c.math1, &c.farsi, &c.akhlagh, &c.english, &c.maaref];

    let committed = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&request))
        .expect("14 units allowed under GPA 12");

    assert_eq!(committed.approval.requested_units, 14);
    assert_eq!(committed.approval.max_units, 14);
    assert!((committed.approval.gpa.unwrap() - 11.0).abs() < 1e-9);
    assert!(bebe.has_taken(&[&c.dm, &c.math1, &c.farsi, &c.akhlagh, &c.english, &c.maaref]));
}

#[test]
fn cannot_take_15_with_gpa_11() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 13.0, 11.0, 9.0);
    let request = [&c.dm, &c.math1, &c.farsi, &c.akhlagh, &c.english, &c.ap];

    let result = Validator::default().enroll(&mut bebe, &requested_offerings(&request));

    match &result {
        Err(RuleViolation::UnitLimitExceeded { gpa, max_units, .. }) => {
            assert!((gpa.unwrap() - 11.0).abs() < 1e-9);
            assert_eq!(*max_units, 14);
        }
        other => panic!("expected unit limit violation, got {other:?}"),
    }
    assert_unit_limit(result, 15);
    assert!(bebe.current_term().is_empty());
}

#[test]
fn can_take_16_with_gpa_12() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 15.0, 12.0, 9.0);
    let request = [&c.dm, &c.ap, &c.math1, &c.economy, &c.farsi, &c.english];

    let committed = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&request))
        .expect("16 units allowed at GPA 12");

    assert_eq!(committed.approval.requested_units, 16);
    assert!((committed.approval.gpa.unwrap() - 12.0).abs() < 1e-9);
}

#[test]
fn cannot_take_18_with_gpa_12() {
    let c = courses();
    let bebe = student_with_grades(&c, 15.0, 12.0, 9.0);
    let request = [&c.dm, &c.ap, &c.math1, &c.economy, &c.farsi, &c.english, &c.maaref];

    assert_unit_limit(
        Validator::default().check(&bebe, &requested_offerings(&request)),
        18,
    );
}

#[test]
fn can_take_14_with_gpa_15() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 15.0, 15.0, 15.0);
    let request = [&c.dm, &c.math2, &c.farsi, &c.akhlagh, &c.english, &c.maaref];

    Validator::default()
        .enroll(&mut bebe, &requested_offerings(&request))
        .expect("14 units allowed at GPA 15");

    assert_eq!(bebe.current_term().len(), 6);
}

#[test]
fn cannot_take_18_with_gpa_15() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 15.0, 15.0, 15.0);
    let request = [&c.ap, &c.dm, &c.math2, &c.economy, &c.farsi, &c.akhlagh, &c.english];

    assert_unit_limit(
        Validator::default().enroll(&mut bebe, &requested_offerings(&request)),
        18,
    );
    assert!(bebe.current_term().is_empty());
}

#[test]
fn can_take_20_with_gpa_16() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 16.0, 16.0, 16.0);
    let request = [&c.ap, &c.dm, &c.math2, &c.phys2, &c.economy, &c.karafarini, &c.farsi];

    let committed = Validator::default()
        .enroll(&mut bebe, &requested_offerings(&request))
        .expect("20 units allowed at GPA 16");

    assert_eq!(committed.approval.requested_units, 20);
    assert_eq!(committed.approval.max_units, 20);
    assert!(bebe.has_taken(&[&c.ap, &c.dm, &c.math2, &c.phys2, &c.economy, &c.karafarini, &c.farsi]));
}

#[test]
fn cannot_take_21_even_with_gpa_20() {
    let c = courses();
    let bebe = student_with_grades(&c, 20.0, 20.0, 20.0);
    let request = [&c.ap, &c.dm, &c.math2, &c.phys2, &c.economy, &c.karafarini, &c.stats];

    assert_unit_limit(
        Validator::default().check(&bebe, &requested_offerings(&request)),
        21,
    );
}

#[test]
fn cannot_take_24() {
    let c = courses();
    let mut bebe = student_with_grades(&c, 16.0, 16.0, 16.0);
    let request = [
        &c.ap,
        &c.dm,
        &c.math2,
        &c.phys2,
        &c.economy,
        &c.karafarini,
        &c.farsi,
        &c.akhlagh,
        &c.english,
    ];

    assert_unit_limit(
        Validator::default().enroll(&mut bebe, &requested_offerings(&request)),
        24,
    );
    assert!(bebe.current_term().is_empty());
}

#[test]
fn new_student_is_capped_only_by_absolute_limit() {
    let c = courses();
    let bebe = Student::new("1", "Bebe");

    let fits = [&c.math1, &c.phys1, &c.prog, &c.economy, &c.karafarini, &c.stats];
    let approval = Validator::default()
        .check(&bebe, &requested_offerings(&fits))
        .expect("19 units is under the absolute cap");
    assert_eq!(approval.requested_units, 19);
    assert_eq!(approval.max_units, 20);

    let too_many = [&c.math1, &c.phys1, &c.prog, &c.economy, &c.karafarini, &c.stats, &c.farsi];
    assert_unit_limit(
        Validator::default().check(&bebe, &requested_offerings(&too_many)),
        21,
    );
}

#[test]
fn oversized_unit_load_is_rejected_not_wrapped() {
    let c = courses();
    let thesis = Arc::new(Course::new("99", "THESIS", u32::MAX));
    let mut bebe = Student::new("1", "Bebe");

    let result = Validator::default().enroll(&mut bebe, &requested_offerings(&[&thesis, &c.farsi]));

    assert_eq!(
        result,
        Err(RuleViolation::UnitLimitExceeded {
            requested_units: u32::MAX,
            gpa: None,
            max_units: 20,
        })
    );
    assert!(bebe.current_term().is_empty());
}

#[test]
fn checking_twice_gives_the_same_verdict() {
    let c = courses();
    let validator = Validator::default();
    let bebe = student_with_grades(&c, 13.0, 11.0, 9.0);

    let rejected = requested_offerings(&[&c.dm, &c.math1, &c.farsi, &c.akhlagh, &c.english, &c.ap]);
    assert_eq!(
        validator.check(&bebe, &rejected),
        validator.check(&bebe, &rejected)
    );

    let accepted = requested_offerings(&[&c.dm, &c.math1]);
    assert_eq!(
        validator.check(&bebe, &accepted),
        validator.check(&bebe, &accepted)
    );
}

#[test]
fn rejected_enrollment_leaves_student_unchanged() {
    let c = courses();
    let validator = Validator::default();
    let mut bebe = student_with_two_terms(&c);
    let transcript_before = bebe.transcript().clone();

    let request = requested_offerings(&[&c.math2, &c.dm, &c.math2]);
    let first = validator.enroll(&mut bebe, &request).unwrap_err();
    let second = validator.enroll(&mut bebe, &request).unwrap_err();

    assert_eq!(first, second);
    assert_eq!(bebe.transcript(), &transcript_before);
    assert!(bebe.current_term().is_empty());
}

#[test]
fn committed_sections_match_request_order() {
    let c = courses();
    let mut bebe = student_with_two_terms(&c);
    let exam = exam_start();
    let request = vec![
        Offering::new(Arc::clone(&c.dm), 3, exam + Duration::days(2)),
        Offering::new(Arc::clone(&c.math2), 1, exam + Duration::days(1)),
        Offering::new(Arc::clone(&c.economy), 2, exam + Duration::days(5)),
    ];

    Validator::default()
        .enroll(&mut bebe, &request)
        .expect("all rules hold");

    let enrolled: Vec<(&str, u32)> = bebe
        .current_term()
        .iter()
        .map(|cs| (cs.course.name(), cs.section))
        .collect();
    assert_eq!(enrolled, vec![("DM", 3), ("MATH2", 1), ("ECO", 2)]);
}
