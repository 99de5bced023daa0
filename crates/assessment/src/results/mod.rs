//! Scoring submissions, persisting results and serving them back.

mod assessment;
pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use assessment::{assess, Assessment};
pub use domain::{ResultRecord, ResultView, ScoringRequest};
pub use export::{write_csv, ExportError};
pub use repository::{RepositoryError, ResultRepository};
pub use router::result_router;
pub use service::{AssessmentResultService, ResultServiceError};
