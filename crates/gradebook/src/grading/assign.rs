use super::policy::CutoffPolicy;

/// Letter grade for `percentage` under `policy`.
///
/// A band is earned only by exceeding its cutoff; a score equal to a cutoff
/// belongs to the band below it.
pub fn assign_grade(percentage: f64, policy: &CutoffPolicy) -> &str {
    policy
        .bands()
        .iter()
        .find(|band| percentage > band.cutoff)
        .map(|band| band.letter.as_str())
        .unwrap_or_else(|| policy.failing_letter())
}
