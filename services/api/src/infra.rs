use managerial_assessment::candidates::{
    Candidate, CandidateId, CandidateRepository, PaymentLedger, PaymentTransaction,
};
use managerial_assessment::progress::{ProgressRepository, TestProgress};
use managerial_assessment::questionnaire::Questionnaire;
use managerial_assessment::repository::RepositoryError;
use managerial_assessment::results::{ResultRecord, ResultRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) questionnaire: Arc<Questionnaire>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<CandidateId, ResultRecord>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn upsert(&self, record: ResultRecord) -> Result<ResultRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.candidate_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, candidate_id: &CandidateId) -> Result<Option<ResultRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(candidate_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<HashMap<CandidateId, Candidate>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
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
        if guard.contains_key(&candidate.id) {
            guard.insert(candidate.id.clone(), candidate);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|candidate| candidate.email == email)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPaymentLedger {
    entries: Arc<Mutex<Vec<PaymentTransaction>>>,
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn record(&self, transaction: PaymentTransaction) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("ledger mutex poisoned");
        guard.push(transaction);
        Ok(())
    }

    fn transactions_for(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<PaymentTransaction>, RepositoryError> {
        let guard = self.entries.lock().expect("ledger mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| &entry.candidate_id == candidate_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProgressRepository {
    records: Arc<Mutex<HashMap<CandidateId, TestProgress>>>,
}

impl ProgressRepository for InMemoryProgressRepository {
    fn fetch(&self, candidate_key: &CandidateId) -> Result<Option<TestProgress>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(candidate_key).cloned())
    }

    fn upsert(&self, progress: TestProgress) -> Result<TestProgress, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(progress.candidate_key.clone(), progress.clone());
        Ok(progress)
    }
}
