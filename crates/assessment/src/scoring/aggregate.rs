use serde::{Deserialize, Serialize};

use super::normalizer::NormalizedAnswers;
use super::section::{percentage_of, score_section, SectionScore};
use crate::questionnaire::Questionnaire;

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub label: String,
    pub score: f64,
}

/// Section scores plus the questionnaire-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub sections: Vec<SectionScore>,
    pub total_score: u32,
    pub max_score: u32,
    /// `100 * total_score / max_score`, one decimal place. Not the mean of
    /// the section percentages when section sizes differ.
    pub percentage_score: f64,
    pub radar: Vec<RadarPoint>,
}

impl AggregateScore {
    pub fn section(&self, section_id: u32) -> Option<&SectionScore> {
        self.sections
            .iter()
            .find(|score| score.section_id == section_id)
    }
}

/// Scores every section of `answers` and sums the results.
pub fn aggregate(questionnaire: &Questionnaire, answers: &NormalizedAnswers) -> AggregateScore {
    let scale_max = questionnaire.scale_max();

    let mut sections: Vec<SectionScore> = answers
        .sections
        .iter()
        .map(|section| score_section(section.section_id, &section.values, scale_max))
        .collect();
    sections.sort_by_key(|score| score.section_id);

    let total_score = sections
        .iter()
        .fold(0u32, |acc, score| acc.saturating_add(score.raw_sum));
    let max_score = sections
        .iter()
        .fold(0u32, |acc, score| acc.saturating_add(score.max_possible));

    let radar = sections
        .iter()
        .map(|score| RadarPoint {
            label: questionnaire
                .section(score.section_id)
                .map(|section| section.label().to_string())
                .unwrap_or_else(|| format!("Section {}", score.section_id)),
            score: score.percentage,
        })
        .collect();

    AggregateScore {
        sections,
        total_score,
        max_score,
        percentage_score: percentage_of(total_score, max_score),
        radar,
    }
}
