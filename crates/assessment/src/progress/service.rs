use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{ProgressUpdate, TestProgress};
use crate::candidates::CandidateId;
use crate::repository::RepositoryError;

/// Progress persistence keyed by candidate.
pub trait ProgressRepository: Send + Sync {
    fn fetch(&self, candidate_key: &CandidateId) -> Result<Option<TestProgress>, RepositoryError>;
    fn upsert(&self, progress: TestProgress) -> Result<TestProgress, RepositoryError>;
}

pub struct ProgressService<R> {
    repository: Arc<R>,
}

impl<R> ProgressService<R>
where
    R: ProgressRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns saved progress, creating an empty record on first visit.
    pub fn load(&self, candidate_key: &CandidateId) -> Result<TestProgress, ProgressServiceError> {
        if candidate_key.as_str().trim().is_empty() {
            return Err(ProgressServiceError::MissingCandidate);
        }
        if let Some(progress) = self.repository.fetch(candidate_key)? {
            return Ok(progress);
        }

        debug!(candidate = %candidate_key, "starting new test progress");
        Ok(self
            .repository
            .upsert(TestProgress::fresh(candidate_key.clone()))?)
    }

    /// Replaces the saved snapshot. `completed_at` is stamped on the first
    /// completed save and cleared if the test is reopened.
    pub fn save(&self, update: ProgressUpdate) -> Result<TestProgress, ProgressServiceError> {
        let key = update.candidate_key.trim();
        if key.is_empty() {
            return Err(ProgressServiceError::MissingCandidate);
        }
        let candidate_key = CandidateId(key.to_string());
        let now = Utc::now();

        let mut progress = self
            .repository
            .fetch(&candidate_key)?
            .unwrap_or_else(|| TestProgress::fresh(candidate_key.clone()));

        progress.completed_at = match (update.completed, progress.completed_at) {
            (true, Some(stamped)) => Some(stamped),
            (true, None) => Some(now),
            (false, _) => None,
        };
        progress.current_section = update.current_section;
        progress.current_question = update.current_question;
        progress.answers = update.answers;
        progress.completed = update.completed;
        progress.updated_at = now;

        let stored = self.repository.upsert(progress)?;
        if stored.completed {
            info!(candidate = %stored.candidate_key, answers = stored.answers.len(), "test marked complete");
        }
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressServiceError {
    #[error("candidate key is required")]
    MissingCandidate,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
