use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ScoringRequest;
use super::repository::ResultRepository;
use super::service::{AssessmentResultService, ResultServiceError};
use crate::candidates::CandidateId;

/// Router builder exposing scoring and result retrieval.
pub fn result_router<R>(service: Arc<AssessmentResultService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/test-result",
            post(score_handler::<R>).get(query_handler::<R>),
        )
        .route(
            "/api/v1/test-result/:candidate_id",
            get(result_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultQuery {
    #[serde(default, alias = "candidateId", alias = "candidateKey")]
    pub(crate) candidate_id: Option<String>,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentResultService<R>>>,
    axum::Json(request): axum::Json<ScoringRequest>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.score(request) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(ResultServiceError::MissingCandidate) => {
            let payload = json!({ "error": "Missing required fields" });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn query_handler<R>(
    State(service): State<Arc<AssessmentResultService<R>>>,
    Query(query): Query<ResultQuery>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match query.candidate_id.filter(|id| !id.trim().is_empty()) {
        Some(candidate_id) => lookup(&service, CandidateId(candidate_id)),
        None => {
            let payload = json!({ "error": "Missing candidateId" });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<AssessmentResultService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    lookup(&service, CandidateId(candidate_id))
}

fn lookup<R>(service: &AssessmentResultService<R>, candidate_id: CandidateId) -> Response
where
    R: ResultRepository + 'static,
{
    match service.get(&candidate_id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "No result found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
