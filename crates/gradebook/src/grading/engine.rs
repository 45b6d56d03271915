use super::assign::assign_grade;
use super::counts::GradeCounts;
use super::domain::{StudentId, StudentRecord};
use super::error::GradingError;
use super::moderation::{moderate, Moderation};
use super::policy::CutoffPolicy;
use super::score::compute_percentage;
use super::weights::WeightTable;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Runs scoring, moderation, and grading over a batch of students.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    weights: WeightTable,
    policy: CutoffPolicy,
    moderation: bool,
}

impl StatisticsEngine {
    pub fn new(weights: WeightTable, policy: CutoffPolicy) -> Self {
        Self {
            weights,
            policy,
            moderation: true,
        }
    }

    /// Enables or disables cutoff moderation for subsequent runs.
    pub fn with_moderation(mut self, enabled: bool) -> Self {
        self.moderation = enabled;
        self
    }

    pub fn moderation_enabled(&self) -> bool {
        self.moderation
    }

    pub fn run(&self, records: &[StudentRecord]) -> Result<BatchOutcome, GradingError> {
        let index = index_students(records)?;
        if records.is_empty() {
            warn!("empty batch: no students to grade");
        }
        info!(
            students = records.len(),
            moderation = self.moderation,
            "grading batch"
        );

        // Every percentage must exist before moderation sees the distribution.
        let percentages = records
            .par_iter()
            .map(|record| compute_percentage(record, &self.weights))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<f64>, GradingError>>()?;

        let moderation = if self.moderation {
            moderate(&self.policy, &percentages)
        } else {
            Moderation::disabled(&self.policy)
        };
        if !moderation.policy.is_ordered() {
            warn!("moderated cutoffs are no longer strictly descending");
        }
        let relocated = moderation.bands.iter().filter(|band| band.moved()).count();
        info!(relocated, "cutoffs moderated");

        let final_policy = &moderation.policy;
        let grades: Vec<String> = percentages
            .par_iter()
            .map(|percentage| assign_grade(*percentage, final_policy).to_string())
            .collect();

        let counts = GradeCounts::tally(final_policy, grades.iter().map(String::as_str));

        let students = records
            .iter()
            .zip(percentages)
            .zip(grades)
            .map(|((record, percentage), grade)| StudentResult {
                id: record.id,
                percentage,
                grade,
            })
            .collect();

        info!(students = records.len(), "batch graded");

        Ok(BatchOutcome {
            students,
            index,
            counts,
            initial_policy: self.policy.clone(),
            moderation,
        })
    }
}

fn index_students(records: &[StudentRecord]) -> Result<HashMap<StudentId, usize>, GradingError> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if index.insert(record.id, position).is_some() {
            return Err(GradingError::DuplicateStudentId(record.id));
        }
    }
    Ok(index)
}

/// Final percentage and grade for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentResult {
    pub id: StudentId,
    pub percentage: f64,
    pub grade: String,
}

/// Everything produced by one [`StatisticsEngine::run`].
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    students: Vec<StudentResult>,
    index: HashMap<StudentId, usize>,
    counts: GradeCounts,
    initial_policy: CutoffPolicy,
    moderation: Moderation,
}

impl BatchOutcome {
    pub fn percentage(&self, id: StudentId) -> Result<f64, GradingError> {
        self.student(id).map(|result| result.percentage)
    }

    pub fn grade(&self, id: StudentId) -> Result<&str, GradingError> {
        self.student(id).map(|result| result.grade.as_str())
    }

    pub fn student(&self, id: StudentId) -> Result<&StudentResult, GradingError> {
        self.index
            .get(&id)
            .map(|position| &self.students[*position])
            .ok_or(GradingError::UnknownStudentId(id))
    }

    /// Results in input order.
    pub fn students(&self) -> &[StudentResult] {
        &self.students
    }

    pub fn percentages(&self) -> impl Iterator<Item = (StudentId, f64)> + '_ {
        self.students
            .iter()
            .map(|result| (result.id, result.percentage))
    }

    pub fn grades(&self) -> impl Iterator<Item = (StudentId, &str)> + '_ {
        self.students
            .iter()
            .map(|result| (result.id, result.grade.as_str()))
    }

    pub fn grade_counts(&self) -> &GradeCounts {
        &self.counts
    }

    pub fn initial_policy(&self) -> &CutoffPolicy {
        &self.initial_policy
    }

    pub fn final_policy(&self) -> &CutoffPolicy {
        &self.moderation.policy
    }

    pub fn moderation(&self) -> &Moderation {
        &self.moderation
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
