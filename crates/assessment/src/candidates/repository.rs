use super::domain::{Candidate, CandidateId, PaymentTransaction};
pub use crate::repository::RepositoryError;

/// Candidate persistence. `insert` rejects a duplicate id or an email that is
/// already registered with `Conflict`; emails are stored lower-cased.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn update(&self, candidate: Candidate) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, RepositoryError>;
}

/// Append-only record of payment transactions.
pub trait PaymentLedger: Send + Sync {
    fn record(&self, transaction: PaymentTransaction) -> Result<(), RepositoryError>;
    fn transactions_for(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError>;
}
