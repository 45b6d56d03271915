use chrono::{DateTime, Local, Utc};
use gradebook::error::AppError;
use gradebook::grading::{BatchSummary, CutoffPolicy, StudentResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct BatchReport<'a> {
    pub(crate) generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) summary: &'a BatchSummary,
}

pub(crate) fn render_json(summary: &BatchSummary) -> Result<(), AppError> {
    let report = BatchReport {
        generated_at: Utc::now(),
        summary,
    };
    let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn render_text(summary: &BatchSummary) {
    println!("Grade report: {}", summary.course);
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!("Students graded: {}", summary.student_count);

    match &summary.distribution {
        Some(stats) => println!(
            "Highest {:.2} | Lowest {:.2} | Mean {:.2} | Median {:.2}",
            stats.highest, stats.lowest, stats.mean, stats.median
        ),
        None => println!("No students in this batch"),
    }

    if summary.moderated {
        println!("\nCutoffs (moderated)");
    } else {
        println!("\nCutoffs (fixed)");
    }
    for cutoff in &summary.cutoffs {
        println!(
            "- {}: {:.2} -> {:.2} ({} nearby, {})",
            cutoff.letter,
            cutoff.initial_cutoff,
            cutoff.final_cutoff,
            cutoff.cluster_size,
            cutoff.rule
        );
    }

    println!("\nGrade distribution");
    for (letter, count) in summary.grade_counts.iter() {
        println!("- {letter}: {count}");
    }

    if !summary.students.is_empty() {
        println!("\nStudent ID, Total Marks, Grade");
        for student in &summary.students {
            println!(
                "{}, {:.2}, {}",
                student.id, student.percentage, student.grade
            );
        }
    }
}

pub(crate) fn render_lookup(result: &StudentResult, policy: &CutoffPolicy) {
    println!(
        "Student {}: {:.2} ({})",
        result.id, result.percentage, result.grade
    );
    let band = policy
        .bands()
        .iter()
        .find(|band| band.letter == result.grade);
    if let Some(band) = band {
        println!("Cutoff for {}: above {:.2}", band.letter, band.cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::config::CourseConfig;
    use gradebook::grading::StudentRecord;

    #[test]
    fn json_report_flattens_summary() {
        let outcome = CourseConfig::standard()
            .engine()
            .run(&[StudentRecord::new(1, vec![80.0, 70.0, 90.0, 85.0])])
            .expect("graded");
        let summary = outcome.summary("Demo");
        let report = BatchReport {
            generated_at: Utc::now(),
            summary: &summary,
        };

        let value = serde_json::to_value(&report).expect("serialize");
        assert!(value.get("generated_at").is_some());
        assert_eq!(value["course"], "Demo");
        assert_eq!(value["students"][0]["percentage"], 82.75);
    }
}
