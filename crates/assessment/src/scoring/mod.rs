//! Answer normalization and score aggregation.
//!
//! Everything here is pure computation over an already-loaded questionnaire;
//! persistence is the caller's concern.

mod aggregate;
mod normalizer;
mod section;

pub use aggregate::{aggregate, AggregateScore, RadarPoint};
pub use normalizer::{normalize, NormalizedAnswers, RawAnswers, SectionAnswers};
pub use section::{score_section, SectionScore};

use std::path::Path;
use std::sync::Arc;

use crate::questionnaire::{Questionnaire, QuestionnaireError};

/// Rounds a percentage to one decimal place, half away from zero.
///
/// Applied once where a percentage is produced; tiers and rankings reuse the
/// rounded value.
pub fn round_percentage(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("questionnaire configuration is missing; cannot score answers")]
    MissingQuestionnaire,
    #[error("questionnaire configuration is invalid: {0}")]
    InvalidQuestionnaire(QuestionnaireError),
}

impl From<QuestionnaireError> for ScoringError {
    fn from(value: QuestionnaireError) -> Self {
        match value {
            QuestionnaireError::Missing { .. } | QuestionnaireError::NoSections => {
                Self::MissingQuestionnaire
            }
            other => Self::InvalidQuestionnaire(other),
        }
    }
}

/// Stateless scorer bound to one questionnaire.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    questionnaire: Arc<Questionnaire>,
}

impl ScoringEngine {
    pub fn new(questionnaire: Arc<Questionnaire>) -> Result<Self, ScoringError> {
        questionnaire.validate()?;
        Ok(Self { questionnaire })
    }

    /// Boundary helper: load the configured questionnaire (or the reference one).
    pub fn load(path: Option<&Path>) -> Result<Self, ScoringError> {
        let questionnaire = Questionnaire::load(path)?;
        Self::new(Arc::new(questionnaire))
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn shared_questionnaire(&self) -> Arc<Questionnaire> {
        Arc::clone(&self.questionnaire)
    }

    pub fn score(&self, raw: &RawAnswers) -> AggregateScore {
        let normalized = normalize(&self.questionnaire, raw);
        aggregate(&self.questionnaire, &normalized)
    }
}
