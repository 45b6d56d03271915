use super::counts::GradeCounts;
use super::domain::round2;
use super::engine::{BatchOutcome, StudentResult};
use super::moderation::ModerationRule;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub highest: f64,
    pub lowest: f64,
    pub mean: f64,
    pub median: f64,
}

impl DistributionSummary {
    /// `None` when there are no scores to summarise.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Some(Self {
            highest: sorted[count - 1],
            lowest: sorted[0],
            mean: round2(mean),
            median: round2(median),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffView {
    pub letter: String,
    pub initial_cutoff: f64,
    pub final_cutoff: f64,
    pub cluster_size: usize,
    pub rule: &'static str,
}

/// Serialisable view of a graded batch for reports and API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub course: String,
    pub student_count: usize,
    pub moderated: bool,
    pub distribution: Option<DistributionSummary>,
    pub cutoffs: Vec<CutoffView>,
    pub failing_letter: String,
    pub grade_counts: GradeCounts,
    pub students: Vec<StudentResult>,
}

impl BatchOutcome {
    pub fn summary(&self, course: &str) -> BatchSummary {
        let scores: Vec<f64> = self
            .percentages()
            .map(|(_, percentage)| percentage)
            .collect();
        let moderation = self.moderation();

        let cutoffs = moderation
            .bands
            .iter()
            .map(|band| CutoffView {
                letter: band.letter.clone(),
                initial_cutoff: band.original_cutoff,
                final_cutoff: band.final_cutoff,
                cluster_size: band.cluster.len(),
                rule: band.rule.label(),
            })
            .collect();

        BatchSummary {
            course: course.to_string(),
            student_count: self.len(),
            moderated: moderation
                .bands
                .iter()
                .any(|band| band.rule != ModerationRule::Disabled),
            distribution: DistributionSummary::from_scores(&scores),
            cutoffs,
            failing_letter: self.final_policy().failing_letter().to_string(),
            grade_counts: self.grade_counts().clone(),
            students: self.students().to_vec(),
        }
    }
}
