//! Marks-file reader and grades-file writer around the grading core.

mod export;
mod parser;

pub use export::write_grades;
pub use parser::{read_marks, read_marks_from_path};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid marks data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: student id '{value}' is not a non-negative integer")]
    InvalidId { line: u64, value: String },
    #[error("line {line}: mark {column} ('{value}') is not a finite number")]
    InvalidMark {
        line: u64,
        column: usize,
        value: String,
    },
    #[error("line {line}: student {id} has no marks")]
    MissingMarks { line: u64, id: u64 },
}
