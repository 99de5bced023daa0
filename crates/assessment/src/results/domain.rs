use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidates::CandidateId;
use crate::scoring::{AggregateScore, RadarPoint, RawAnswers};

/// Inbound scoring request. `candidateId` is accepted for older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    #[serde(alias = "candidateId")]
    pub candidate_key: String,
    #[serde(default)]
    pub answers: RawAnswers,
}

/// Persisted assessment outcome. One per candidate; recomputing replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub candidate_id: CandidateId,
    pub scores: AggregateScore,
    pub narrative_report: String,
    pub computed_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn view(&self) -> ResultView {
        let section_columns = self
            .scores
            .sections
            .iter()
            .map(|section| (format!("section{}Score", section.section_id), section.raw_sum))
            .collect();

        ResultView {
            candidate_key: self.candidate_id.0.clone(),
            section_columns,
            total_score: self.scores.total_score,
            percentage_score: self.scores.percentage_score,
            radar_data: self.scores.radar.clone(),
            narrative_report: self.narrative_report.clone(),
            computed_at: self.computed_at,
        }
    }
}

/// Wire shape of a stored result: one `section<N>Score` column per section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub candidate_key: String,
    #[serde(flatten)]
    pub section_columns: BTreeMap<String, u32>,
    pub total_score: u32,
    pub percentage_score: f64,
    pub radar_data: Vec<RadarPoint>,
    pub narrative_report: String,
    pub computed_at: DateTime<Utc>,
}
