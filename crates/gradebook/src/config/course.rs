use crate::grading::{
    Component, CutoffPolicy, GradeBand, GradingError, StatisticsEngine, WeightTable,
    DEFAULT_FAILING_LETTER,
};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::ConfigError;

fn default_course_name() -> String {
    "Course".to_string()
}

fn default_failing_letter() -> String {
    DEFAULT_FAILING_LETTER.to_string()
}

const fn default_moderation() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    #[serde(default = "default_course_name")]
    name: String,
    components: Vec<Component>,
    bands: Vec<GradeBand>,
    #[serde(default = "default_failing_letter")]
    failing_letter: String,
    #[serde(default = "default_moderation")]
    moderation: bool,
}

/// Grading scheme for one course: weights, letter bands, and moderation toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseConfig {
    pub name: String,
    pub weights: WeightTable,
    pub policy: CutoffPolicy,
    pub moderation: bool,
}

impl RawCourse {
    fn validate(self) -> Result<CourseConfig, GradingError> {
        Ok(CourseConfig {
            name: self.name,
            weights: WeightTable::new(self.components)?,
            policy: CutoffPolicy::new(self.bands, self.failing_letter)?,
            moderation: self.moderation,
        })
    }
}

impl<'de> Deserialize<'de> for CourseConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawCourse::deserialize(deserializer)?
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

impl CourseConfig {
    /// Labs 30, midterm 15, assignments 30, final 25; A > 80, B > 65, C > 50, D > 40.
    pub fn standard() -> Self {
        let components = vec![
            Component::new("labs", 30.0),
            Component::new("midterm", 15.0),
            Component::new("assignments", 30.0),
            Component::new("final", 25.0),
        ];
        let bands = vec![
            GradeBand::new("A", 80.0),
            GradeBand::new("B", 65.0),
            GradeBand::new("C", 50.0),
            GradeBand::new("D", 40.0),
        ];

        Self {
            name: "Standard course".to_string(),
            weights: WeightTable { components },
            policy: CutoffPolicy {
                bands,
                failing_letter: DEFAULT_FAILING_LETTER.to_string(),
            },
            moderation: true,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::CourseIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|err| match err {
            ConfigError::CourseFormat { source, .. } => ConfigError::CourseFormat {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        serde_json::from_reader(reader)
            .map_err(|source| ConfigError::CourseFormat { path: None, source })
    }

    /// Loads `path` when given, otherwise the standard course.
    pub fn load_or_standard(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn engine(&self) -> StatisticsEngine {
        StatisticsEngine::new(self.weights.clone(), self.policy.clone())
            .with_moderation(self.moderation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_course_is_valid() {
        let course = CourseConfig::standard();
        let rebuilt =
            WeightTable::new(course.weights.components().to_vec()).expect("valid weights");
        assert_eq!(rebuilt, course.weights);
        let rebuilt = CutoffPolicy::new(
            course.policy.bands().to_vec(),
            course.policy.failing_letter(),
        )
        .expect("valid policy");
        assert_eq!(rebuilt, course.policy);
        assert!(course.moderation);
    }

    #[test]
    fn parses_course_json_with_defaults() {
        let json = r#"{
            "components": [
                {"name": "quiz", "weight": 10, "out_of": 20},
                {"name": "exam", "weight": 90}
            ],
            "bands": [{"letter": "P", "cutoff": 50}]
        }"#;
        let course = CourseConfig::from_reader(Cursor::new(json)).expect("course parses");
        assert_eq!(course.name, "Course");
        assert_eq!(course.weights.components()[0].out_of, 20.0);
        assert_eq!(course.policy.failing_letter(), "F");
        assert!(course.moderation);
    }

    #[test]
    fn rejects_invalid_weight_sum() {
        let json = r#"{
            "components": [{"name": "exam", "weight": 90}],
            "bands": [{"letter": "P", "cutoff": 50}]
        }"#;
        let error = CourseConfig::from_reader(Cursor::new(json)).expect_err("weights sum to 90");
        assert!(error.to_string().contains("sum to 90"), "{error}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = CourseConfig::from_path("./no-such-course.json").expect_err("missing");
        assert!(matches!(error, ConfigError::CourseIo { .. }));
    }
}
