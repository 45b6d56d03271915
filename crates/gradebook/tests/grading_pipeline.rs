//! End-to-end behavior of the scoring, moderation, and grading pipeline through
//! the public API.

use gradebook::grading::{
    assign_grade, moderate, CutoffPolicy, GradingError, ModerationRule, StatisticsEngine,
    StudentId, StudentRecord, WeightTable, MODERATION_RADIUS,
};

fn course_weights() -> WeightTable {
    WeightTable::from_pairs([("labs", 30.0), ("mid", 15.0), ("assign", 30.0), ("end", 25.0)])
        .expect("valid weights")
}

fn course_policy() -> CutoffPolicy {
    CutoffPolicy::from_pairs([("A", 80.0), ("B", 65.0), ("C", 50.0), ("D", 40.0)])
        .expect("valid policy")
}

fn engine() -> StatisticsEngine {
    StatisticsEngine::new(course_weights(), course_policy())
}

#[test]
fn two_student_batch_matches_hand_calculation() {
    let records = vec![
        StudentRecord::new(1, vec![80.0, 70.0, 90.0, 85.0]),
        StudentRecord::new(2, vec![40.0, 30.0, 45.0, 38.0]),
    ];

    let outcome = engine().run(&records).expect("batch grades");

    assert_eq!(outcome.percentage(StudentId(1)), Ok(82.75));
    assert_eq!(outcome.percentage(StudentId(2)), Ok(39.5));

    let bands = &outcome.moderation().bands;
    // 82.75 is 2.75 above 80, outside the window
    assert_eq!(bands[0].rule, ModerationRule::EmptyCluster);
    assert_eq!(bands[1].rule, ModerationRule::EmptyCluster);
    assert_eq!(bands[2].rule, ModerationRule::EmptyCluster);
    assert_eq!(bands[3].rule, ModerationRule::SoleMember);

    let cutoffs: Vec<f64> = outcome.final_policy().cutoffs().collect();
    assert_eq!(cutoffs, [80.0, 65.0, 50.0, 39.5]);

    assert_eq!(outcome.grade(StudentId(1)), Ok("A"));
    assert_eq!(outcome.grade(StudentId(2)), Ok("F"));
}

#[test]
fn sole_member_on_cutoff_falls_to_lower_band() {
    let records = vec![
        StudentRecord::new(1, vec![81.0, 81.0, 81.0, 81.0]),
        StudentRecord::new(2, vec![95.0, 95.0, 95.0, 95.0]),
    ];

    let outcome = engine().run(&records).expect("batch grades");

    assert_eq!(outcome.final_policy().bands()[0].cutoff, 81.0);
    assert_eq!(outcome.grade(StudentId(1)), Ok("B"));
    assert_eq!(outcome.grade(StudentId(2)), Ok("A"));
}

#[test]
fn boundary_percentage_never_earns_the_upper_band() {
    let policy = course_policy();
    for band in policy.bands() {
        let grade = assign_grade(band.cutoff, &policy);
        assert_ne!(grade, band.letter, "cutoff {} must not earn {}", band.cutoff, band.letter);
    }
}

#[test]
fn grade_counts_close_over_the_batch() {
    let records: Vec<StudentRecord> = (0..25)
        .map(|id| {
            let mark = 20.0 + id as f64 * 3.1;
            StudentRecord::new(id, vec![mark; 4])
        })
        .collect();

    let outcome = engine().run(&records).expect("batch grades");
    let counts = outcome.grade_counts();

    assert_eq!(counts.total(), records.len());
    let letters: Vec<&str> = counts.iter().map(|(letter, _)| letter).collect();
    assert_eq!(letters, ["A", "B", "C", "D", "F"]);
    for record in &records {
        assert!(outcome.grade(record.id).is_ok());
        assert!(outcome.percentage(record.id).is_ok());
    }
}

#[test]
fn moderated_cutoffs_stay_near_their_origin() {
    let scores: Vec<f64> = [
        79.1, 80.4, 81.9, 82.3, 64.2, 66.8, 63.0, 67.0, 49.5, 51.75, 38.2, 41.1, 41.9,
    ]
    .to_vec();

    let moderation = moderate(&course_policy(), &scores);

    for band in &moderation.bands {
        if band.cluster.is_empty() {
            assert_eq!(band.final_cutoff, band.original_cutoff);
        } else {
            assert!((band.final_cutoff - band.original_cutoff).abs() <= MODERATION_RADIUS);
            let highest = band.cluster[0];
            let lowest = band.cluster[band.cluster.len() - 1];
            assert!(band.final_cutoff <= highest && band.final_cutoff >= lowest);
        }
    }
}

#[test]
fn moderation_is_deterministic_and_assignment_pure() {
    let records = vec![
        StudentRecord::new(1, vec![66.0; 4]),
        StudentRecord::new(2, vec![64.0; 4]),
        StudentRecord::new(3, vec![63.5; 4]),
    ];

    let first = engine().run(&records).expect("batch grades");
    let second = engine().run(&records).expect("batch grades");
    assert_eq!(first.final_policy(), second.final_policy());

    let policy = first.final_policy();
    for result in first.students() {
        assert_eq!(assign_grade(result.percentage, policy), result.grade);
        assert_eq!(assign_grade(result.percentage, policy), result.grade);
    }
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let weights = WeightTable::from_pairs([("labs", 30.0), ("exam", 30.0)]);
    assert!(weights.is_err());

    let error: GradingError = weights.expect_err("sum is 60").into();
    assert!(error.to_string().starts_with("invalid weight table"));
}
