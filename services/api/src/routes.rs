use crate::infra::{
    AppState, InMemoryCandidateRepository, InMemoryPaymentLedger, InMemoryProgressRepository,
    InMemoryResultRepository,
};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use managerial_assessment::candidates::{candidate_router, CandidateService};
use managerial_assessment::progress::{progress_router, ProgressService};
use managerial_assessment::questionnaire::{PresentedQuestion, Scale};
use managerial_assessment::results::{result_router, AssessmentResultService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) struct AssessmentServices {
    pub(crate) results: Arc<AssessmentResultService<InMemoryResultRepository>>,
    pub(crate) candidates: Arc<CandidateService<InMemoryCandidateRepository, InMemoryPaymentLedger>>,
    pub(crate) progress: Arc<ProgressService<InMemoryProgressRepository>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionnaireQuery {
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionnaireResponse {
    pub(crate) title: String,
    pub(crate) instructions: String,
    pub(crate) scale: Scale,
    pub(crate) seed: u64,
    pub(crate) questions: Vec<PresentedQuestion>,
}

pub(crate) fn with_assessment_routes(services: AssessmentServices) -> axum::Router {
    result_router(services.results)
        .merge(candidate_router(services.candidates))
        .merge(progress_router(services.progress))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/questionnaire",
            axum::routing::get(questionnaire_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Questions in delivery order. Answer keys stay tied to the original positions.
pub(crate) async fn questionnaire_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<QuestionnaireQuery>,
) -> Json<QuestionnaireResponse> {
    let seed = query.seed.unwrap_or_else(rand::random);
    let questionnaire = &state.questionnaire;

    Json(QuestionnaireResponse {
        title: questionnaire.title.clone(),
        instructions: questionnaire.instructions.clone(),
        scale: questionnaire.scale.clone(),
        seed,
        questions: questionnaire.presentation_order(seed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum_prometheus::PrometheusMetricLayer;
    use managerial_assessment::candidates::PaymentSettings;
    use managerial_assessment::questionnaire::Questionnaire;
    use managerial_assessment::scoring::ScoringEngine;
    use std::sync::atomic::AtomicBool;
    use std::sync::OnceLock;
    use tower::ServiceExt;

    fn metrics_handle() -> Arc<metrics_exporter_prometheus::PrometheusHandle> {
        static HANDLE: OnceLock<Arc<metrics_exporter_prometheus::PrometheusHandle>> =
            OnceLock::new();
        HANDLE
            .get_or_init(|| {
                let (_, handle) = PrometheusMetricLayer::pair();
                Arc::new(handle)
            })
            .clone()
    }

    fn app(ready: bool) -> axum::Router {
        let questionnaire = Arc::new(Questionnaire::reference().expect("reference questionnaire"));
        let engine = ScoringEngine::new(questionnaire.clone()).expect("engine");
        let services = AssessmentServices {
            results: Arc::new(AssessmentResultService::new(
                engine,
                Arc::new(InMemoryResultRepository::default()),
            )),
            candidates: Arc::new(CandidateService::new(
                Arc::new(InMemoryCandidateRepository::default()),
                Arc::new(InMemoryPaymentLedger::default()),
                PaymentSettings::default(),
            )),
            progress: Arc::new(ProgressService::new(Arc::new(
                InMemoryProgressRepository::default(),
            ))),
        };
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: metrics_handle(),
            questionnaire,
        };
        with_assessment_routes(services).layer(Extension(state))
    }

    async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        let value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).expect("json payload")
        };
        (status, value)
    }

    fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_readiness_report_status() {
        let (status, body) = send(
            app(false),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(
            app(false),
            Request::get("/ready").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, _) = send(
            app(true),
            Request::get("/ready").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn questionnaire_endpoint_is_deterministic_per_seed() {
        let uri = "/api/v1/questionnaire?seed=42";
        let (status, first) = send(app(true), Request::get(uri).body(Body::empty()).unwrap()).await;
        let (_, second) = send(app(true), Request::get(uri).body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["seed"], 42);
        assert_eq!(first["questions"].as_array().map(Vec::len), Some(81));
        assert_eq!(first["questions"], second["questions"]);
    }

    #[tokio::test]
    async fn candidate_can_pay_save_progress_and_get_scored() {
        let router = app(true);

        let (status, candidate) = send(
            router.clone(),
            post_json(
                "/api/v1/candidates",
                json!({ "email": "lead@example.com", "firstName": "Sam", "lastName": "Rivera" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let candidate_id = candidate["id"].as_str().expect("candidate id").to_string();

        let (status, session) = send(
            router.clone(),
            post_json(
                "/api/v1/payment/session",
                json!({ "candidateId": candidate_id, "paymentMethod": "stripe" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["url"], format!("/test?candidateId={candidate_id}").as_str());

        let (status, _) = send(
            router.clone(),
            Request::get(format!("/api/v1/test-result/{candidate_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let answers: serde_json::Map<String, serde_json::Value> = (1..=9)
            .flat_map(|section| (0..9).map(move |index| (format!("{section}-{index}"), json!(3))))
            .collect();
        let (status, _) = send(
            router.clone(),
            post_json(
                "/api/v1/test-progress",
                json!({
                    "candidateId": candidate_id,
                    "currentSection": 9,
                    "currentQuestion": 8,
                    "answers": answers,
                    "completed": true,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, result) = send(
            router.clone(),
            post_json(
                "/api/v1/test-result",
                json!({ "candidateKey": candidate_id, "answers": answers }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["totalScore"], 243);

        let (status, stored) = send(
            router,
            Request::get(format!("/api/v1/test-result/{candidate_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored, result);
    }
}
