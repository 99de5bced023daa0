use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCandidateRepository, InMemoryPaymentLedger, InMemoryProgressRepository,
    InMemoryResultRepository,
};
use crate::routes::{with_assessment_routes, AssessmentServices};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use managerial_assessment::candidates::{CandidateService, PaymentSettings};
use managerial_assessment::config::AppConfig;
use managerial_assessment::error::AppError;
use managerial_assessment::progress::ProgressService;
use managerial_assessment::results::AssessmentResultService;
use managerial_assessment::scoring::ScoringEngine;
use managerial_assessment::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = ScoringEngine::load(config.assessment.questionnaire_path.as_deref())?;
    info!(
        sections = engine.questionnaire().sections.len(),
        questions = engine.questionnaire().total_questions(),
        scale_max = engine.questionnaire().scale_max(),
        "questionnaire loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        questionnaire: engine.shared_questionnaire(),
    };

    let services = AssessmentServices {
        results: Arc::new(AssessmentResultService::new(
            engine,
            Arc::new(InMemoryResultRepository::default()),
        )),
        candidates: Arc::new(CandidateService::new(
            Arc::new(InMemoryCandidateRepository::default()),
            Arc::new(InMemoryPaymentLedger::default()),
            PaymentSettings::from(&config.assessment),
        )),
        progress: Arc::new(ProgressService::new(Arc::new(
            InMemoryProgressRepository::default(),
        ))),
    };

    let app = with_assessment_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "managerial assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
