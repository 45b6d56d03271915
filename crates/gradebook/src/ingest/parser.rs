use super::IngestError;
use crate::grading::StudentRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub fn read_marks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentRecord>, IngestError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_marks(file)
}

/// Parses headerless `id,mark,mark,...` rows.
///
/// Row lengths are not compared against any weight table here; the engine
/// rejects mismatched records.
pub fn read_marks<R: Read>(reader: R) -> Result<Vec<StudentRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let raw_id = row.get(0).unwrap_or_default();
        let id = raw_id.parse::<u64>().map_err(|_| IngestError::InvalidId {
            line,
            value: raw_id.to_string(),
        })?;

        let marks = row
            .iter()
            .enumerate()
            .skip(1)
            .map(|(column, value)| parse_mark(line, column, value))
            .collect::<Result<Vec<f64>, IngestError>>()?;
        if marks.is_empty() {
            return Err(IngestError::MissingMarks { line, id });
        }

        records.push(StudentRecord::new(id, marks));
    }

    debug!(records = records.len(), "marks parsed");
    Ok(records)
}

fn parse_mark(line: u64, column: usize, value: &str) -> Result<f64, IngestError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|mark| mark.is_finite())
        .ok_or_else(|| IngestError::InvalidMark {
            line,
            column,
            value: value.to_string(),
        })
}
