use crate::infra::InMemoryResultRepository;
use clap::Args;
use managerial_assessment::config::AppConfig;
use managerial_assessment::error::AppError;
use managerial_assessment::narrative::Tier;
use managerial_assessment::results::{write_csv, AssessmentResultService, ResultRecord, ScoringRequest};
use managerial_assessment::scoring::{RawAnswers, ScoringEngine};
use managerial_assessment::telemetry::{self, LogOutput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the answers map ("<section>-<index>": value)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Candidate key to attach to the result
    #[arg(long, default_value = "cli")]
    pub(crate) candidate: String,
    /// Questionnaire JSON (defaults to APP_QUESTIONNAIRE_PATH or the built-in one)
    #[arg(long)]
    pub(crate) questionnaire: Option<PathBuf>,
    /// Also write a per-section CSV export to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SimulateArgs {
    /// Answer every question with this value
    #[arg(long, conflicts_with = "seed")]
    pub(crate) value: Option<i64>,
    /// Seed for pseudo-random answers (used when --value is absent)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Questionnaire JSON (defaults to APP_QUESTIONNAIRE_PATH or the built-in one)
    #[arg(long)]
    pub(crate) questionnaire: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        candidate,
        questionnaire,
        csv,
    } = args;

    let service = offline_service(questionnaire)?;
    let answers = read_answers(&answers)?;
    let record = service.score(ScoringRequest {
        candidate_key: candidate,
        answers,
    })?;

    render_summary(&record);
    println!("\n{}", record.narrative_report);

    if let Some(path) = csv {
        let file = File::create(&path)?;
        write_csv(&record, service.engine().questionnaire(), file)?;
        println!("\nCSV export written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        value,
        seed,
        questionnaire,
    } = args;

    let service = offline_service(questionnaire)?;
    let questionnaire = service.engine().questionnaire();
    let scale_max = i64::from(questionnaire.scale_max());

    let answers: RawAnswers = match value {
        Some(value) => {
            println!("Simulating uniform answers of {value}");
            questionnaire
                .answer_keys()
                .map(|key| (key.to_string(), value))
                .collect()
        }
        None => {
            let seed = seed.unwrap_or_else(rand::random);
            println!("Simulating random answers (seed {seed})");
            let mut rng = StdRng::seed_from_u64(seed);
            questionnaire
                .answer_keys()
                .map(|key| (key.to_string(), rng.gen_range(1..=scale_max)))
                .collect()
        }
    };

    let record = service.score(ScoringRequest {
        candidate_key: "simulation".to_string(),
        answers,
    })?;

    render_summary(&record);
    println!("\n{}", record.narrative_report);
    Ok(())
}

fn offline_service(
    questionnaire: Option<PathBuf>,
) -> Result<AssessmentResultService<InMemoryResultRepository>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_output(&config.telemetry, LogOutput::Stderr)?;

    let path = questionnaire.or(config.assessment.questionnaire_path);
    let engine = ScoringEngine::load(path.as_deref())?;
    Ok(AssessmentResultService::new(
        engine,
        Arc::new(InMemoryResultRepository::default()),
    ))
}

fn read_answers(path: &Path) -> Result<RawAnswers, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn render_summary(record: &ResultRecord) {
    let scores = &record.scores;
    println!("Assessment summary for {}", record.candidate_id);
    for (section, point) in scores.sections.iter().zip(&scores.radar) {
        println!(
            "- {}: {}/{} ({:.1}%, {})",
            point.label,
            section.raw_sum,
            section.max_possible,
            section.percentage,
            Tier::classify(section.percentage).label()
        );
    }
    println!(
        "Total: {}/{} ({:.1}%)",
        scores.total_score, scores.max_score, scores.percentage_score
    );
}
