use std::io::Write;

use serde::Serialize;

use super::domain::ResultRecord;
use crate::narrative::Tier;
use crate::questionnaire::Questionnaire;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    section_id: String,
    title: &'a str,
    raw_score: u32,
    max_score: u32,
    percentage: String,
    tier: &'a str,
}

/// One row per section plus a closing `total` row.
pub fn write_csv<W: Write>(
    record: &ResultRecord,
    questionnaire: &Questionnaire,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    for section in &record.scores.sections {
        let title = questionnaire
            .section(section.section_id)
            .map(|s| s.title.as_str())
            .unwrap_or("");
        csv.serialize(ExportRow {
            section_id: section.section_id.to_string(),
            title,
            raw_score: section.raw_sum,
            max_score: section.max_possible,
            percentage: format!("{:.1}", section.percentage),
            tier: Tier::classify(section.percentage).label(),
        })?;
    }

    csv.serialize(ExportRow {
        section_id: "total".to_string(),
        title: "Overall",
        raw_score: record.scores.total_score,
        max_score: record.scores.max_score,
        percentage: format!("{:.1}", record.scores.percentage_score),
        tier: "",
    })?;

    csv.flush()?;
    Ok(())
}
