use super::domain::StudentRecord;
use super::error::GradingError;
use super::report::BatchSummary;
use crate::config::CourseConfig;
use serde::Deserialize;

/// One self-contained grading request.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeBatchRequest {
    pub students: Vec<StudentRecord>,
    /// Overrides the service's default course.
    #[serde(default)]
    pub course: Option<CourseConfig>,
    /// Overrides the course's moderation setting.
    #[serde(default)]
    pub moderation: Option<bool>,
}

/// Grades request batches against a default course. Holds no batch state.
#[derive(Debug, Clone)]
pub struct GradingService {
    default_course: CourseConfig,
}

impl GradingService {
    pub fn new(default_course: CourseConfig) -> Self {
        Self { default_course }
    }

    pub fn grade(&self, request: GradeBatchRequest) -> Result<BatchSummary, GradingError> {
        let course = request.course.as_ref().unwrap_or(&self.default_course);
        let moderation = request.moderation.unwrap_or(course.moderation);
        let outcome = course
            .engine()
            .with_moderation(moderation)
            .run(&request.students)?;
        Ok(outcome.summary(&course.name))
    }
}
