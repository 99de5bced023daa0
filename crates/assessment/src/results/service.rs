use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::assessment::{assess, Assessment};
use super::domain::{ResultRecord, ScoringRequest};
use super::repository::{RepositoryError, ResultRepository};
use crate::candidates::CandidateId;
use crate::scoring::ScoringEngine;

/// Scores submissions and persists the outcome with a single upsert.
pub struct AssessmentResultService<R> {
    engine: ScoringEngine,
    repository: Arc<R>,
}

impl<R> AssessmentResultService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(engine: ScoringEngine, repository: Arc<R>) -> Self {
        Self { engine, repository }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Computes the assessment without storing it.
    pub fn preview(&self, request: &ScoringRequest) -> Assessment {
        assess(self.engine.questionnaire(), &request.answers)
    }

    /// Recomputes the candidate's result from scratch and replaces the stored record.
    pub fn score(&self, request: ScoringRequest) -> Result<ResultRecord, ResultServiceError> {
        let candidate_key = request.candidate_key.trim();
        if candidate_key.is_empty() {
            return Err(ResultServiceError::MissingCandidate);
        }

        let Assessment { scores, narrative } = self.preview(&request);
        let record = ResultRecord {
            candidate_id: CandidateId(candidate_key.to_string()),
            narrative_report: narrative.render(),
            scores,
            computed_at: Utc::now(),
        };

        let stored = self.repository.upsert(record).map_err(|err| {
            warn!(candidate = %candidate_key, error = %err, "failed to persist assessment result");
            err
        })?;

        info!(
            candidate = %stored.candidate_id.0,
            total = stored.scores.total_score,
            percentage = stored.scores.percentage_score,
            "assessment scored"
        );
        Ok(stored)
    }

    /// Stored result for a candidate; `None` until the test has been scored.
    pub fn get(&self, candidate_id: &CandidateId) -> Result<Option<ResultRecord>, ResultServiceError> {
        Ok(self.repository.fetch(candidate_id)?)
    }
}

/// Error raised by the result service.
#[derive(Debug, thiserror::Error)]
pub enum ResultServiceError {
    #[error("candidate key is required")]
    MissingCandidate,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
