//! Tiered narrative report built from an [`AggregateScore`](crate::scoring::AggregateScore).

mod catalog;
mod generator;
mod tier;

pub use catalog::{section_narrative, SectionNarrative, DEVELOPMENT_PLAN};
pub use generator::{generate, rank_sections, NarrativeReport, RankedSection, SectionAssessment};
pub use tier::{
    ProfileBand, Tier, DEVELOPMENT_THRESHOLD, EXCELLENCE_THRESHOLD, GOOD_PROFILE_THRESHOLD,
    SOLID_THRESHOLD, STRONG_PROFILE_THRESHOLD,
};
