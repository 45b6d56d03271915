use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use tracing::warn;

use super::report::BatchSummary;
use super::service::{GradeBatchRequest, GradingService};
use crate::error::AppError;

/// Router exposing batch grading over HTTP.
pub fn grading_router(service: Arc<GradingService>) -> Router {
    Router::new()
        .route("/api/v1/grades", post(grade_handler))
        .with_state(service)
}

pub(crate) async fn grade_handler(
    State(service): State<Arc<GradingService>>,
    Json(request): Json<GradeBatchRequest>,
) -> Result<Json<BatchSummary>, AppError> {
    let summary = service.grade(request).inspect_err(|error| {
        warn!(%error, "grading request rejected");
    })?;
    Ok(Json(summary))
}
