use std::sync::Arc;

use managerial_assessment::narrative::{self, ProfileBand, Tier};
use managerial_assessment::questionnaire::Questionnaire;
use managerial_assessment::results::assess;
use managerial_assessment::scoring::{normalize, RawAnswers, ScoringEngine, ScoringError};
use serde_json::json;

fn reference() -> Questionnaire {
    Questionnaire::reference().expect("reference questionnaire parses")
}

/// Nine one-question sections on a ten-point scale, so response `v` scores `10 * v` percent.
fn decile_questionnaire() -> Questionnaire {
    let labels: serde_json::Map<String, serde_json::Value> = (1..=10)
        .map(|value| (value.to_string(), json!(format!("level {value}"))))
        .collect();
    let sections: Vec<_> = (1..=9)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Dimension {id}"),
                "questions": [format!("Question for dimension {id}")],
            })
        })
        .collect();
    let raw = json!({ "scale": { "labels": labels }, "sections": sections });
    Questionnaire::from_json_str(&raw.to_string()).expect("decile questionnaire parses")
}

fn uniform(questionnaire: &Questionnaire, value: i64) -> RawAnswers {
    questionnaire
        .answer_keys()
        .map(|key| (key.to_string(), value))
        .collect()
}

#[test]
fn normalizing_dense_answers_is_idempotent() {
    let questionnaire = reference();
    let mut answers = uniform(&questionnaire, 4);
    answers.remove("3-2");
    answers.remove("9-8");

    let once = normalize(&questionnaire, &answers);
    let twice = normalize(&questionnaire, &once.to_raw());

    assert_eq!(once, twice);
    assert_eq!(once.answered(), 79);
}

#[test]
fn empty_answers_score_zero_everywhere() {
    let questionnaire = reference();

    let assessment = assess(&questionnaire, &RawAnswers::new());

    assert_eq!(assessment.scores.sections.len(), 9);
    assert!(assessment
        .scores
        .sections
        .iter()
        .all(|section| section.raw_sum == 0 && section.percentage == 0.0));
    assert_eq!(assessment.scores.total_score, 0);
    assert_eq!(assessment.scores.percentage_score, 0.0);
    assert_eq!(assessment.narrative.band, ProfileBand::Emerging);
    assert!(assessment.narrative.render().contains("Overall score: 0.0%"));
}

#[test]
fn percentages_stay_within_bounds() {
    let questionnaire = reference();
    let engine = ScoringEngine::new(Arc::new(questionnaire.clone())).expect("engine");

    for seed in 0..25u64 {
        let answers: RawAnswers = questionnaire
            .answer_keys()
            .enumerate()
            .map(|(position, key)| {
                let value = (position as u64 * 7 + seed * 13) % 6;
                (key.to_string(), value as i64)
            })
            .collect();

        let score = engine.score(&answers);

        assert!((0.0..=100.0).contains(&score.percentage_score));
        for section in &score.sections {
            assert!((0.0..=100.0).contains(&section.percentage));
            assert!(section.raw_sum <= section.max_possible);
        }
    }
}

#[test]
fn overall_percentage_is_weighted_by_question_count() {
    let questionnaire = Questionnaire::from_json_str(
        r#"{
            "scale": { "labels": { "1": "a", "2": "b", "3": "c", "4": "d", "5": "e" } },
            "sections": [
                { "id": 1, "title": "Short", "questions": [ "q" ] },
                { "id": 2, "title": "Long", "questions": [ "q", "q", "q", "q" ] }
            ]
        }"#,
    )
    .expect("questionnaire parses");
    let mut answers = RawAnswers::new();
    answers.insert("1-0".to_string(), 5);
    for index in 0..4 {
        answers.insert(format!("2-{index}"), 1);
    }

    let score = assess(&questionnaire, &answers).scores;
    let naive_mean = (score.sections[0].percentage + score.sections[1].percentage) / 2.0;

    assert_eq!(score.sections[0].percentage, 100.0);
    assert_eq!(score.sections[1].percentage, 20.0);
    assert_eq!(score.percentage_score, 36.0);
    assert_ne!(score.percentage_score, naive_mean);
}

#[test]
fn tier_thresholds_are_inclusive() {
    assert_eq!(Tier::classify(60.0), Tier::Solid);
    assert_eq!(Tier::classify(59.0), Tier::Development);
    assert_eq!(Tier::classify(80.0), Tier::Excellence);
    assert_eq!(Tier::classify(79.9), Tier::Solid);
    assert_eq!(Tier::classify(40.0), Tier::Development);
    assert_eq!(Tier::classify(39.9), Tier::Priority);
}

#[test]
fn strengths_and_priorities_follow_distinct_scores() {
    let questionnaire = decile_questionnaire();
    let values = [3, 9, 1, 7, 5, 2, 8, 4, 6];
    let answers: RawAnswers = values
        .iter()
        .enumerate()
        .map(|(position, value)| (format!("{}-0", position + 1), *value))
        .collect();

    let report = assess(&questionnaire, &answers).narrative;

    let strengths: Vec<f64> = report.strengths.iter().map(|s| s.percentage).collect();
    let priorities: Vec<f64> = report.priorities.iter().map(|s| s.percentage).collect();
    assert_eq!(strengths, vec![90.0, 80.0, 70.0]);
    assert_eq!(priorities, vec![10.0, 20.0, 30.0]);
    assert!(report
        .strengths
        .iter()
        .all(|strength| report
            .priorities
            .iter()
            .all(|priority| priority.section_id != strength.section_id)));
}

#[test]
fn uniform_threes_produce_a_solid_tied_report() {
    let questionnaire = reference();

    let assessment = assess(&questionnaire, &uniform(&questionnaire, 3));
    let scores = &assessment.scores;

    for section in &scores.sections {
        assert_eq!(section.raw_sum, 27);
        assert_eq!(section.max_possible, 45);
        assert_eq!(section.percentage, 60.0);
    }
    assert_eq!(scores.total_score, 243);
    assert_eq!(scores.percentage_score, 60.0);

    let report = &assessment.narrative;
    assert!(report.sections.iter().all(|s| s.tier == Tier::Solid));
    let strengths: Vec<u32> = report.strengths.iter().map(|s| s.section_id).collect();
    let priorities: Vec<u32> = report.priorities.iter().map(|s| s.section_id).collect();
    assert_eq!(strengths, vec![1, 2, 3]);
    assert_eq!(priorities, vec![9, 8, 7]);
    assert_eq!(report.band, ProfileBand::Good);
}

#[test]
fn narrative_generation_is_deterministic() {
    let questionnaire = reference();
    let answers = uniform(&questionnaire, 4);

    let first = assess(&questionnaire, &answers);
    let second = assess(&questionnaire, &answers);

    assert_eq!(first, second);
    assert_eq!(
        narrative::generate(&questionnaire, &first.scores).render(),
        first.narrative.render()
    );
}

#[test]
fn scoring_without_questionnaire_is_rejected() {
    let missing = std::path::Path::new("definitely/not/here/questionnaire.json");

    match ScoringEngine::load(Some(missing)) {
        Err(ScoringError::MissingQuestionnaire) => {}
        other => panic!("expected missing questionnaire, got {other:?}"),
    }
}
