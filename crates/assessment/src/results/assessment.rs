use crate::narrative::{self, NarrativeReport};
use crate::questionnaire::Questionnaire;
use crate::scoring::{aggregate, normalize, AggregateScore, RawAnswers};

/// Scores and narrative computed from one answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub scores: AggregateScore,
    pub narrative: NarrativeReport,
}

/// `(questionnaire, answers) -> assessment`, with no I/O.
pub fn assess(questionnaire: &Questionnaire, answers: &RawAnswers) -> Assessment {
    let normalized = normalize(questionnaire, answers);
    let scores = aggregate(questionnaire, &normalized);
    let narrative = narrative::generate(questionnaire, &scores);
    Assessment { scores, narrative }
}
