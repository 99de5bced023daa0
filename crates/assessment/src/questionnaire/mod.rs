//! Static questionnaire configuration: sections, questions and the response scale.
//!
//! The questionnaire is loaded once at the boundary and shared read-only. The
//! scale maximum is the number of labels on the scale, never a literal.

mod key;

pub use key::{AnswerKey, InvalidAnswerKey};

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

const REFERENCE_QUESTIONNAIRE: &str = include_str!("../../data/questionnaire.json");

/// Full questionnaire definition as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    pub scale: Scale,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_styles_section: Option<ManagementStylesSection>,
}

/// Likert scale descriptor. Only the label set is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    pub labels: BTreeMap<String, String>,
}

impl Scale {
    pub fn max_value(&self) -> u32 {
        u32::try_from(self.labels.len()).unwrap_or(u32::MAX)
    }

    pub fn label_for(&self, value: u32) -> Option<&str> {
        self.labels.get(&value.to_string()).map(String::as_str)
    }
}

/// One competency dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub title: String,
    /// Compact label used on the radar chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn label(&self) -> &str {
        self.short_title.as_deref().unwrap_or(&self.title)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionRepr")]
pub struct Question {
    pub id: u32,
    pub text: String,
}

/// Older exports list questions as bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionRepr {
    Full { id: u32, text: String },
    Text(String),
}

impl From<QuestionRepr> for Question {
    fn from(value: QuestionRepr) -> Self {
        match value {
            QuestionRepr::Full { id, text } => Question { id, text },
            QuestionRepr::Text(text) => Question { id: 0, text },
        }
    }
}

/// Unscored block describing preferred management styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementStylesSection {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scale: Scale,
    pub styles: Vec<String>,
}

/// A question as shown to the candidate, tagged with its stable answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedQuestion {
    pub key: AnswerKey,
    pub section_title: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("questionnaire configuration not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read questionnaire {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("questionnaire is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("questionnaire defines no sections")]
    NoSections,
    #[error("questionnaire scale defines no labels")]
    EmptyScale,
    #[error("section id {0} appears more than once")]
    DuplicateSection(u32),
}

impl Questionnaire {
    /// Built-in nine-dimension questionnaire on a 1-5 scale.
    pub fn reference() -> Result<Self, QuestionnaireError> {
        Self::from_json_str(REFERENCE_QUESTIONNAIRE)
    }

    /// Loads from `path`, or the reference questionnaire when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, QuestionnaireError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::reference(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionnaireError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                QuestionnaireError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                QuestionnaireError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionnaireError> {
        let questionnaire: Self = serde_json::from_reader(reader)?;
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, QuestionnaireError> {
        let questionnaire: Self = serde_json::from_str(raw)?;
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        if self.sections.is_empty() {
            return Err(QuestionnaireError::NoSections);
        }
        if self.scale.labels.is_empty() {
            return Err(QuestionnaireError::EmptyScale);
        }
        let mut seen = BTreeSet::new();
        for section in &self.sections {
            if !seen.insert(section.id) {
                return Err(QuestionnaireError::DuplicateSection(section.id));
            }
        }
        Ok(())
    }

    pub fn scale_max(&self) -> u32 {
        self.scale.max_value()
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(Section::question_count).sum()
    }

    /// Every answer key in section order, then question order.
    pub fn answer_keys(&self) -> impl Iterator<Item = AnswerKey> + '_ {
        self.sections.iter().flat_map(|section| {
            (0..section.question_count()).map(move |index| AnswerKey::new(section.id, index))
        })
    }

    /// Flattened, shuffled question list for delivery. The same seed always
    /// yields the same order; keys keep pointing at the original positions.
    pub fn presentation_order(&self, seed: u64) -> Vec<PresentedQuestion> {
        let mut questions: Vec<PresentedQuestion> = self
            .sections
            .iter()
            .flat_map(|section| {
                section
                    .questions
                    .iter()
                    .enumerate()
                    .map(move |(index, question)| PresentedQuestion {
                        key: AnswerKey::new(section.id, index),
                        section_title: section.title.clone(),
                        text: question.text.clone(),
                    })
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        questions.shuffle(&mut rng);
        questions
    }
}
