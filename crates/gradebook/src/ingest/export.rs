use crate::grading::BatchOutcome;
use std::io::Write;

/// Writes `Student ID,Total Marks,Grade` rows in input order.
pub fn write_grades<W: Write>(outcome: &BatchOutcome, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Student ID", "Total Marks", "Grade"])?;

    for result in outcome.students() {
        csv_writer.write_record([
            result.id.to_string(),
            format!("{:.2}", result.percentage),
            result.grade.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CourseConfig;
    use crate::grading::StudentRecord;

    #[test]
    fn writes_header_and_rows_in_input_order() {
        let outcome = CourseConfig::standard()
            .engine()
            .run(&[
                StudentRecord::new(2, vec![40.0, 30.0, 45.0, 38.0]),
                StudentRecord::new(1, vec![80.0, 70.0, 90.0, 85.0]),
            ])
            .expect("graded");

        let mut buffer = Vec::new();
        write_grades(&outcome, &mut buffer).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "Student ID,Total Marks,Grade\n2,39.50,F\n1,82.75,A\n");
    }
}
