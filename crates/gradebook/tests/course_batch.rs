use gradebook::config::CourseConfig;
use gradebook::grading::{ModerationRule, StudentId};
use gradebook::ingest::{read_marks, read_marks_from_path, write_grades, IngestError};
use std::path::PathBuf;

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

fn demo_course() -> CourseConfig {
    CourseConfig::from_path(demo_path("ip-course.json")).expect("demo course loads")
}

#[test]
fn demo_course_scales_marks_by_component_maximum() {
    let course = demo_course();
    assert_eq!(course.name, "Introductory Programming");
    assert_eq!(course.weights.len(), 6);
    assert_eq!(course.policy.letters().count(), 8);

    let records = read_marks_from_path(demo_path("ip-marks.csv")).expect("marks load");
    assert_eq!(records.len(), 10);

    let outcome = course.engine().run(&records).expect("batch grades");
    assert_eq!(outcome.percentage(StudentId(1001)), Ok(88.1));
    assert_eq!(outcome.percentage(StudentId(1007)), Ok(97.05));
    assert_eq!(outcome.percentage(StudentId(1008)), Ok(27.8));
}

#[test]
fn demo_batch_moderates_crowded_cutoffs() {
    let course = demo_course();
    let records = read_marks_from_path(demo_path("ip-marks.csv")).expect("marks load");
    let outcome = course.engine().run(&records).expect("batch grades");
    let bands = &outcome.moderation().bands;

    // A- window around 70 holds 71.25 and 69.65
    assert_eq!(bands[1].cluster, [71.25, 69.65]);
    assert_eq!(bands[1].final_cutoff, 70.45);
    assert!(matches!(bands[1].rule, ModerationRule::LargestGap { .. }));

    // B window around 60 holds only 59.55
    assert_eq!(bands[2].final_cutoff, 59.55);
    assert_eq!(bands[2].rule, ModerationRule::SoleMember);

    // B- cutoff moves between 51.2 and 50.85
    assert!(bands[3].final_cutoff > 50.85 && bands[3].final_cutoff < 51.2);

    assert_eq!(outcome.grade(StudentId(1009)), Ok("B"));
    assert_eq!(outcome.grade(StudentId(1005)), Ok("B-"));
    assert_eq!(outcome.grade(StudentId(1004)), Ok("C"));
    assert_eq!(outcome.grade(StudentId(1006)), Ok("D"));
    assert_eq!(outcome.grade(StudentId(1008)), Ok("F"));

    let counts = outcome.grade_counts();
    assert_eq!(counts.total(), 10);
    assert_eq!(counts.get("A"), Some(2));
    assert_eq!(counts.get("C-"), Some(0));
}

#[test]
fn demo_batch_without_moderation_uses_fixed_cutoffs() {
    let course = demo_course();
    let records = read_marks_from_path(demo_path("ip-marks.csv")).expect("marks load");
    let outcome = course
        .engine()
        .with_moderation(false)
        .run(&records)
        .expect("batch grades");

    assert_eq!(outcome.grade(StudentId(1004)), Ok("B-"));
    assert_eq!(outcome.grade(StudentId(1006)), Ok("C-"));
}

#[test]
fn graded_batch_exports_to_csv() {
    let records = read_marks("11,80,70,90,85\n12,40,30,45,38\n".as_bytes()).expect("parse");
    let outcome = CourseConfig::standard()
        .engine()
        .run(&records)
        .expect("graded");

    let mut buffer = Vec::new();
    write_grades(&outcome, &mut buffer).expect("export");
    let text = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        ["Student ID,Total Marks,Grade", "11,82.75,A", "12,39.50,F"]
    );
}

#[test]
fn malformed_marks_file_stops_before_grading() {
    let error = read_marks("1,80,70\n2,eighty,70\n".as_bytes()).expect_err("bad mark");
    assert!(matches!(
        error,
        IngestError::InvalidMark {
            line: 2,
            column: 1,
            ..
        }
    ));
}
