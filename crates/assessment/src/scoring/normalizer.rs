use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::questionnaire::{AnswerKey, Questionnaire};

/// Sparse answers as submitted: `"<section>-<index>" -> response`.
pub type RawAnswers = BTreeMap<String, i64>;

/// Dense answers for one section; position `i` is question `i`, `0` when unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAnswers {
    pub section_id: u32,
    pub values: Vec<u32>,
}

/// Dense answers for every configured section, ordered by section id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAnswers {
    pub sections: Vec<SectionAnswers>,
}

impl NormalizedAnswers {
    pub fn section(&self, section_id: u32) -> Option<&SectionAnswers> {
        self.sections
            .iter()
            .find(|section| section.section_id == section_id)
    }

    pub fn answered(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| section.values.iter())
            .filter(|value| **value > 0)
            .count()
    }

    /// Back to the sparse wire form, dropping unanswered positions.
    pub fn to_raw(&self) -> RawAnswers {
        self.sections
            .iter()
            .flat_map(|section| {
                section
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value > 0)
                    .map(move |(index, value)| {
                        (
                            AnswerKey::new(section.section_id, index).to_string(),
                            i64::from(*value),
                        )
                    })
            })
            .collect()
    }
}

/// Expands sparse answers into one dense sequence per section.
///
/// Keys that do not parse, name an unknown section or an out-of-range
/// question are skipped, as are responses outside `1..=scale_max`.
pub fn normalize(questionnaire: &Questionnaire, raw: &RawAnswers) -> NormalizedAnswers {
    let scale_max = i64::from(questionnaire.scale_max());

    let mut sections: Vec<SectionAnswers> = questionnaire
        .sections
        .iter()
        .map(|section| SectionAnswers {
            section_id: section.id,
            values: vec![0; section.question_count()],
        })
        .collect();
    sections.sort_by_key(|section| section.section_id);

    for (raw_key, &response) in raw {
        let Some(key) = AnswerKey::parse(raw_key) else {
            debug!(key = %raw_key, "ignoring malformed answer key");
            continue;
        };
        let Some(slot) = sections
            .iter_mut()
            .find(|section| section.section_id == key.section_id)
            .and_then(|section| section.values.get_mut(key.index))
        else {
            debug!(%key, "ignoring answer for unknown question");
            continue;
        };
        if !(1..=scale_max).contains(&response) {
            debug!(%key, response, scale_max, "ignoring out-of-scale response");
            continue;
        }
        *slot = response as u32;
    }

    NormalizedAnswers { sections }
}
