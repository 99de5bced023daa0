use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{
    Candidate, CandidateId, CandidateRegistration, PaymentProvider, PaymentSession,
    PaymentStatus, PaymentTransaction,
};
use super::payment::{parse_webhook, simulated_transaction_id, PaymentSettings, WebhookError};
use super::repository::{CandidateRepository, PaymentLedger, RepositoryError};

/// Registration and the placeholder payment flow that unlocks the test.
pub struct CandidateService<R, L> {
    repository: Arc<R>,
    ledger: Arc<L>,
    settings: PaymentSettings,
}

/// Result of `register`; `created` is false when the email was already known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub candidate: Candidate,
    pub created: bool,
}

/// What a webhook did to the candidate it named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    MarkedPaid(CandidateId),
    Recorded {
        candidate_id: CandidateId,
        status: PaymentStatus,
    },
    UnknownCandidate,
}

impl<R, L> CandidateService<R, L>
where
    R: CandidateRepository + 'static,
    L: PaymentLedger + 'static,
{
    pub fn new(repository: Arc<R>, ledger: Arc<L>, settings: PaymentSettings) -> Self {
        Self {
            repository,
            ledger,
            settings,
        }
    }

    pub fn settings(&self) -> &PaymentSettings {
        &self.settings
    }

    /// Registers a candidate, or returns the existing one for the same email.
    pub fn register(
        &self,
        registration: CandidateRegistration,
    ) -> Result<Registration, CandidateServiceError> {
        let email = required(&registration.email, "email")?.to_ascii_lowercase();
        let first_name = required(&registration.first_name, "firstName")?.to_string();
        let last_name = required(&registration.last_name, "lastName")?.to_string();

        if let Some(existing) = self.repository.find_by_email(&email)? {
            return Ok(Self::existing(existing));
        }

        let now = Utc::now();
        let email_key = email.clone();
        let candidate = Candidate {
            id: CandidateId::generate(),
            email,
            first_name,
            last_name,
            company: optional(registration.company),
            department: optional(registration.department),
            position: optional(registration.position),
            has_paid: false,
            payment_method: None,
            payment_id: None,
            payment_amount: None,
            created_at: now,
            updated_at: now,
        };

        match self.repository.insert(candidate) {
            Ok(stored) => {
                info!(candidate = %stored.id, "candidate registered");
                Ok(Registration {
                    candidate: stored,
                    created: true,
                })
            }
            // Another registration for the same email won the insert.
            Err(RepositoryError::Conflict) => {
                let existing = self
                    .repository
                    .find_by_email(&email_key)?
                    .ok_or(RepositoryError::Conflict)?;
                Ok(Self::existing(existing))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn existing(candidate: Candidate) -> Registration {
        info!(candidate = %candidate.id, "candidate already registered");
        Registration {
            candidate,
            created: false,
        }
    }

    pub fn get(&self, id: &CandidateId) -> Result<Candidate, CandidateServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(CandidateServiceError::NotFound)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, CandidateServiceError> {
        Ok(self
            .repository
            .find_by_email(&email.trim().to_ascii_lowercase())?)
    }

    /// Settles the fee immediately; no gateway is contacted.
    pub fn create_payment_session(
        &self,
        id: &CandidateId,
        provider: PaymentProvider,
    ) -> Result<PaymentSession, CandidateServiceError> {
        let mut candidate = self.get(id)?;
        let transaction_id = simulated_transaction_id();

        self.ledger.record(PaymentTransaction {
            transaction_id: transaction_id.clone(),
            candidate_id: candidate.id.clone(),
            provider,
            amount: self.settings.fee,
            currency: self.settings.currency.clone(),
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        })?;

        candidate.has_paid = true;
        candidate.payment_method = Some(provider);
        candidate.payment_id = Some(transaction_id.clone());
        candidate.payment_amount = Some(self.settings.fee);
        candidate.updated_at = Utc::now();
        self.repository.update(candidate)?;

        info!(candidate = %id, %provider, transaction = %transaction_id, "simulated payment completed");
        Ok(PaymentSession {
            url: format!("/test?candidateId={id}"),
            message: format!(
                "Payment of {} {} simulated via {provider}",
                self.settings.fee, self.settings.currency
            ),
            transaction_id,
        })
    }

    /// Records a provider notification in the ledger and marks the candidate
    /// paid on success. Signatures are not verified.
    pub fn handle_webhook(
        &self,
        provider: &str,
        payload: &Value,
    ) -> Result<WebhookOutcome, CandidateServiceError> {
        let provider = PaymentProvider::parse(provider)
            .ok_or_else(|| WebhookError::UnsupportedProvider(provider.to_string()))?;
        let event = parse_webhook(provider, payload)?;
        let status = event.payment_status();

        let known = match event.email.as_deref() {
            Some(email) => self.repository.find_by_email(email)?,
            None => None,
        };
        let Some(mut candidate) = known else {
            warn!(%provider, transaction = %event.transaction_id, "payment notification for unknown candidate");
            return Ok(WebhookOutcome::UnknownCandidate);
        };

        self.ledger.record(PaymentTransaction {
            transaction_id: event.transaction_id.clone(),
            candidate_id: candidate.id.clone(),
            provider,
            amount: self.settings.fee,
            currency: self.settings.currency.clone(),
            status,
            created_at: Utc::now(),
        })?;

        if status != PaymentStatus::Completed {
            info!(candidate = %candidate.id, %provider, raw_status = %event.status, ?status, "payment notification recorded");
            return Ok(WebhookOutcome::Recorded {
                candidate_id: candidate.id,
                status,
            });
        }

        if !candidate.has_paid {
            candidate.has_paid = true;
            candidate.payment_method = Some(provider);
            candidate.payment_id = Some(event.transaction_id);
            candidate.payment_amount = Some(self.settings.fee);
            candidate.updated_at = Utc::now();
            self.repository.update(candidate.clone())?;
        }

        info!(candidate = %candidate.id, %provider, "payment confirmed by webhook");
        Ok(WebhookOutcome::MarkedPaid(candidate.id))
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CandidateServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CandidateServiceError::MissingField(field));
    }
    Ok(trimmed)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("candidate not found")]
    NotFound,
    #[error(transparent)]
    Webhook(#[from] WebhookError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
