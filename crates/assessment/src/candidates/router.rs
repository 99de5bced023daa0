use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::domain::{CandidateId, CandidateRegistration, PaymentSessionRequest};
use super::repository::{CandidateRepository, PaymentLedger, RepositoryError};
use super::service::{CandidateService, CandidateServiceError, WebhookOutcome};

/// Router builder for registration and payment endpoints.
pub fn candidate_router<R, L>(service: Arc<CandidateService<R, L>>) -> Router
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(register_handler::<R, L>))
        .route("/api/v1/candidates/:id", get(candidate_handler::<R, L>))
        .route("/api/v1/payment/session", post(session_handler::<R, L>))
        .route(
            "/api/v1/payment/webhook/:provider",
            post(webhook_handler::<R, L>),
        )
        .with_state(service)
}

pub(crate) async fn register_handler<R, L>(
    State(service): State<Arc<CandidateService<R, L>>>,
    axum::Json(registration): axum::Json<CandidateRegistration>,
) -> Response
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    match service.register(registration) {
        Ok(registration) => {
            let status = if registration.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, axum::Json(registration.candidate)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn candidate_handler<R, L>(
    State(service): State<Arc<CandidateService<R, L>>>,
    Path(id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    match service.get(&CandidateId(id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<R, L>(
    State(service): State<Arc<CandidateService<R, L>>>,
    axum::Json(request): axum::Json<PaymentSessionRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    match service.create_payment_session(&request.candidate_id, request.payment_method) {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn webhook_handler<R, L>(
    State(service): State<Arc<CandidateService<R, L>>>,
    Path(provider): Path<String>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    match service.handle_webhook(&provider, &payload) {
        Ok(outcome) => {
            let body = match outcome {
                WebhookOutcome::MarkedPaid(id) => json!({ "received": true, "candidateId": id }),
                WebhookOutcome::Recorded {
                    candidate_id,
                    status,
                } => json!({ "received": true, "candidateId": candidate_id, "status": status }),
                WebhookOutcome::UnknownCandidate => {
                    json!({ "received": true, "ignored": "unknown candidate" })
                }
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: CandidateServiceError) -> Response {
    let status = match &err {
        CandidateServiceError::MissingField(_) | CandidateServiceError::Webhook(_) => {
            StatusCode::BAD_REQUEST
        }
        CandidateServiceError::NotFound => StatusCode::NOT_FOUND,
        CandidateServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CandidateServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
