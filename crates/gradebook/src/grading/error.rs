use super::domain::StudentId;

/// Failures raised by the grading core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradingError {
    #[error(
        "student {student} has {actual} mark(s) but the weight table has {expected} component(s)"
    )]
    DimensionMismatch {
        student: StudentId,
        expected: usize,
        actual: usize,
    },
    #[error("student {0} appears more than once in the batch")]
    DuplicateStudentId(StudentId),
    #[error("student {0} not found")]
    UnknownStudentId(StudentId),
    #[error("invalid weight table: {0}")]
    InvalidWeightTable(#[from] WeightTableError),
    #[error("invalid cutoff policy: {0}")]
    InvalidCutoffPolicy(#[from] PolicyError),
}

/// Reasons a weight table is rejected at configuration time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightTableError {
    #[error("at least one component is required")]
    Empty,
    #[error("component name at position {0} is blank")]
    BlankName(usize),
    #[error("component '{0}' is listed more than once")]
    DuplicateComponent(String),
    #[error("component '{name}' has invalid weight {weight}")]
    InvalidWeight { name: String, weight: f64 },
    #[error("component '{name}' has invalid maximum mark {out_of}")]
    InvalidOutOf { name: String, out_of: f64 },
    #[error("weights sum to {0} instead of 100")]
    WeightSum(f64),
}

/// Reasons a cutoff policy is rejected at configuration time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("at least one passing band is required")]
    Empty,
    #[error("grade letter at position {0} is blank")]
    BlankLetter(usize),
    #[error("grade letter '{0}' is used more than once")]
    DuplicateLetter(String),
    #[error("cutoff for '{letter}' is not a finite number")]
    NonFiniteCutoff { letter: String },
    #[error("cutoff for '{lower}' ({lower_cutoff}) must be below '{upper}' ({upper_cutoff})")]
    NotDescending {
        upper: String,
        upper_cutoff: f64,
        lower: String,
        lower_cutoff: f64,
    },
}
