use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::candidates::repository::{CandidateRepository, PaymentLedger, RepositoryError};
use crate::candidates::{
    candidate_router, Candidate, CandidateId, CandidateRegistration, CandidateService,
    PaymentSettings, PaymentTransaction,
};

pub(super) fn registration() -> CandidateRegistration {
    CandidateRegistration {
        email: "  Ada.Lovelace@Example.com ".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company: Some("Analytical Engines".to_string()),
        department: Some(" ".to_string()),
        position: None,
    }
}

pub(super) fn settings() -> PaymentSettings {
    PaymentSettings {
        fee: 49,
        currency: "EUR".to_string(),
    }
}

pub(super) fn build_service() -> (
    CandidateService<MemoryCandidates, MemoryLedger>,
    Arc<MemoryCandidates>,
    Arc<MemoryLedger>,
) {
    let repository = Arc::new(MemoryCandidates::default());
    let ledger = Arc::new(MemoryLedger::default());
    let service = CandidateService::new(repository.clone(), ledger.clone(), settings());
    (service, repository, ledger)
}

#[derive(Default, Clone)]
pub(super) struct MemoryCandidates {
    pub(super) records: Arc<Mutex<HashMap<CandidateId, Candidate>>>,
}

impl CandidateRepository for MemoryCandidates {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&candidate.id)
            || guard.values().any(|existing| existing.email == candidate.email)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(candidate.id.clone(), candidate.clone());
        Ok(candidate)
    }

    fn update(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&candidate.id) {
            Some(existing) => {
                *existing = candidate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().find(|candidate| candidate.email == email).cloned())
    }
}

/// Misses the first email lookup, as if a concurrent registration landed
/// between the lookup and the insert.
#[derive(Default)]
pub(super) struct RacingCandidates {
    pub(super) inner: MemoryCandidates,
    pub(super) lookup_missed: AtomicBool,
}

impl CandidateRepository for RacingCandidates {
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        self.inner.insert(candidate)
    }

    fn update(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        self.inner.update(candidate)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, RepositoryError> {
        if !self.lookup_missed.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_email(email)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    pub(super) entries: Arc<Mutex<Vec<PaymentTransaction>>>,
}

impl MemoryLedger {
    pub(super) fn entries(&self) -> Vec<PaymentTransaction> {
        self.entries.lock().expect("ledger mutex poisoned").clone()
    }
}

impl PaymentLedger for MemoryLedger {
    fn record(&self, transaction: PaymentTransaction) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .expect("ledger mutex poisoned")
            .push(transaction);
        Ok(())
    }

    fn transactions_for(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError> {
        Ok(self
            .entries()
            .into_iter()
            .filter(|entry| &entry.candidate_id == candidate_id)
            .collect())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn candidate_router_with_service(
    service: CandidateService<MemoryCandidates, MemoryLedger>,
) -> axum::Router {
    candidate_router(Arc::new(service))
}
