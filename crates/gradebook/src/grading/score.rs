use super::domain::{round2, StudentRecord};
use super::error::GradingError;
use super::weights::WeightTable;

/// Weighted percentage for one student, rounded to two decimals.
///
/// A record whose mark count differs from the table length is rejected
/// instead of being paired up to the shorter sequence.
pub fn compute_percentage(
    record: &StudentRecord,
    weights: &WeightTable,
) -> Result<f64, GradingError> {
    if record.marks.len() != weights.len() {
        return Err(GradingError::DimensionMismatch {
            student: record.id,
            expected: weights.len(),
            actual: record.marks.len(),
        });
    }

    let total: f64 = record
        .marks
        .iter()
        .zip(weights.components())
        .map(|(mark, component)| component.scale(*mark))
        .sum();

    Ok(round2(total))
}
