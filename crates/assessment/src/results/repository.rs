use crate::candidates::CandidateId;
pub use crate::repository::RepositoryError;

use super::domain::ResultRecord;

/// Result store keyed by candidate. `upsert` replaces any previous record in
/// full (last write wins, no merge).
pub trait ResultRepository: Send + Sync {
    fn upsert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError>;
    fn fetch(&self, candidate_id: &CandidateId) -> Result<Option<ResultRecord>, RepositoryError>;
}
