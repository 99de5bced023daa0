use serde::{Deserialize, Serialize};

use super::round_percentage;

/// Score for one section, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_id: u32,
    pub raw_sum: u32,
    pub max_possible: u32,
    /// Rounded to one decimal place.
    pub percentage: f64,
}

/// Sums a dense answer sequence; a section that cannot score anything reports 0%.
pub fn score_section(section_id: u32, values: &[u32], scale_max: u32) -> SectionScore {
    let raw_sum = values.iter().fold(0u32, |acc, value| acc.saturating_add(*value));
    let question_count = u32::try_from(values.len()).unwrap_or(u32::MAX);
    let max_possible = question_count.saturating_mul(scale_max);

    SectionScore {
        section_id,
        raw_sum,
        max_possible,
        percentage: percentage_of(raw_sum, max_possible),
    }
}

pub(crate) fn percentage_of(value: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    round_percentage(100.0 * f64::from(value) / f64::from(max))
}
