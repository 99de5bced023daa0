use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::candidates::CandidateId;
use crate::questionnaire::Questionnaire;
use crate::results::repository::{RepositoryError, ResultRepository};
use crate::results::{result_router, AssessmentResultService, ResultRecord, ScoringRequest};
use crate::scoring::{RawAnswers, ScoringEngine};

pub(super) fn engine() -> ScoringEngine {
    let questionnaire = Questionnaire::reference().expect("reference questionnaire parses");
    ScoringEngine::new(Arc::new(questionnaire)).expect("reference questionnaire validates")
}

/// Every question of every section answered with `value`.
pub(super) fn uniform_answers(value: i64) -> RawAnswers {
    engine()
        .questionnaire()
        .answer_keys()
        .map(|key| (key.to_string(), value))
        .collect()
}

pub(super) fn request(candidate: &str, answers: RawAnswers) -> ScoringRequest {
    ScoringRequest {
        candidate_key: candidate.to_string(),
        answers,
    }
}

pub(super) fn build_service() -> (
    AssessmentResultService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentResultService::new(engine(), repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CandidateId, ResultRecord>>>,
    pub(super) writes: Arc<Mutex<usize>>,
}

impl MemoryRepository {
    pub(super) fn write_count(&self) -> usize {
        *self.writes.lock().expect("counter mutex poisoned")
    }
}

impl ResultRepository for MemoryRepository {
    fn upsert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        *self.writes.lock().expect("counter mutex poisoned") += 1;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, candidate_id: &CandidateId) -> Result<Option<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(candidate_id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn upsert(&self, _record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _candidate_id: &CandidateId) -> Result<Option<ResultRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn result_router_with_service(
    service: AssessmentResultService<MemoryRepository>,
) -> axum::Router {
    result_router(Arc::new(service))
}
