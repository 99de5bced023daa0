use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::ProgressUpdate;
use super::service::{ProgressRepository, ProgressService, ProgressServiceError};
use crate::candidates::CandidateId;

pub fn progress_router<R>(service: Arc<ProgressService<R>>) -> Router
where
    R: ProgressRepository + 'static,
{
    Router::new()
        .route("/api/v1/test-progress", post(save_handler::<R>))
        .route(
            "/api/v1/test-progress/:candidate_key",
            get(load_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn load_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    Path(candidate_key): Path<String>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    match service.load(&CandidateId(candidate_key)) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<ProgressService<R>>>,
    axum::Json(update): axum::Json<ProgressUpdate>,
) -> Response
where
    R: ProgressRepository + 'static,
{
    match service.save(update) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ProgressServiceError) -> Response {
    let status = match &err {
        ProgressServiceError::MissingCandidate => StatusCode::BAD_REQUEST,
        ProgressServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
