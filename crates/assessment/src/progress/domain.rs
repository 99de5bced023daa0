use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidates::CandidateId;
use crate::scoring::RawAnswers;

/// Where a candidate left off in the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestProgress {
    pub candidate_key: CandidateId,
    pub current_section: u32,
    pub current_question: usize,
    pub answers: RawAnswers,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TestProgress {
    pub fn fresh(candidate_key: CandidateId) -> Self {
        let now = Utc::now();
        Self {
            candidate_key,
            current_section: 1,
            current_question: 0,
            answers: RawAnswers::new(),
            completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Client snapshot sent on every autosave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(alias = "candidateId")]
    pub candidate_key: String,
    #[serde(default = "first_section")]
    pub current_section: u32,
    #[serde(default)]
    pub current_question: usize,
    #[serde(default)]
    pub answers: RawAnswers,
    #[serde(default)]
    pub completed: bool,
}

fn first_section() -> u32 {
    1
}
