//! Candidate registration and the simulated payment that gates the test.

pub mod domain;
pub mod payment;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateId, CandidateRegistration, PaymentProvider, PaymentSession,
    PaymentSessionRequest, PaymentStatus, PaymentTransaction,
};
pub use payment::{parse_webhook, simulated_transaction_id, PaymentSettings, WebhookError, WebhookEvent};
pub use repository::{CandidateRepository, PaymentLedger};
pub use router::candidate_router;
pub use service::{CandidateService, CandidateServiceError, Registration, WebhookOutcome};
