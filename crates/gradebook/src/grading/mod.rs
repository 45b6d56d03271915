//! Weighted scoring, cutoff moderation, and grade assignment.

mod assign;
mod counts;
mod domain;
mod engine;
mod error;
pub mod moderation;
mod policy;
pub mod report;
pub mod router;
mod score;
mod service;
mod weights;

pub use assign::assign_grade;
pub use counts::GradeCounts;
pub use domain::{StudentId, StudentRecord};
pub use engine::{BatchOutcome, StatisticsEngine, StudentResult};
pub use error::{GradingError, PolicyError, WeightTableError};
pub use moderation::{moderate, BandModeration, Moderation, ModerationRule, MODERATION_RADIUS};
pub use policy::{CutoffPolicy, GradeBand, DEFAULT_FAILING_LETTER};
pub use report::{BatchSummary, CutoffView, DistributionSummary};
pub use router::grading_router;
pub use score::compute_percentage;
pub use service::{GradeBatchRequest, GradingService};
pub use weights::{Component, WeightTable};
