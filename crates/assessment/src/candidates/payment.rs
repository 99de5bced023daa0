use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde_json::Value;

use super::domain::{PaymentProvider, PaymentStatus};

static TRANSACTION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Flat fee charged before the test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSettings {
    pub fee: u32,
    pub currency: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            fee: 49,
            currency: "EUR".to_string(),
        }
    }
}

impl From<&crate::config::AssessmentConfig> for PaymentSettings {
    fn from(config: &crate::config::AssessmentConfig) -> Self {
        Self {
            fee: config.assessment_fee,
            currency: config.currency.clone(),
        }
    }
}

/// `sim_<unix-millis>_<seq>`; unique within the process.
pub fn simulated_transaction_id() -> String {
    let sequence = TRANSACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("sim_{}_{}", Utc::now().timestamp_millis(), sequence)
}

/// Provider-neutral view of a webhook notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub provider: PaymentProvider,
    pub transaction_id: String,
    pub status: String,
    pub email: Option<String>,
}

impl WebhookEvent {
    pub fn is_successful(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "succeeded" | "COMPLETED")
    }

    /// Ledger status for the notification; anything not pending or successful is a failure.
    pub fn payment_status(&self) -> PaymentStatus {
        if self.is_successful() {
            return PaymentStatus::Completed;
        }
        match self.status.to_ascii_lowercase().as_str() {
            "pending" | "processing" | "open" | "unpaid" | "created" | "approved" => {
                PaymentStatus::Pending
            }
            _ => PaymentStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("unsupported payment provider `{0}`")]
    UnsupportedProvider(String),
    #[error("{provider} webhook is missing `{field}`")]
    MissingField {
        provider: PaymentProvider,
        field: &'static str,
    },
}

/// Pulls transaction id, status and payer email out of a provider payload.
pub fn parse_webhook(provider: PaymentProvider, payload: &Value) -> Result<WebhookEvent, WebhookError> {
    let (id_path, status_path, email_path): (&[&str], &[&str], &[&str]) = match provider {
        PaymentProvider::Stripe => (
            &["data", "object", "id"],
            &["data", "object", "payment_status"],
            &["data", "object", "customer_email"],
        ),
        PaymentProvider::Paypal => (&["id"], &["status"], &["payer", "email_address"]),
        PaymentProvider::Weeroo => (&["transactionId"], &["status"], &["customer", "email"]),
    };

    let transaction_id = lookup(payload, id_path).ok_or(WebhookError::MissingField {
        provider,
        field: "transaction id",
    })?;
    let status = lookup(payload, status_path).ok_or(WebhookError::MissingField {
        provider,
        field: "status",
    })?;

    Ok(WebhookEvent {
        provider,
        transaction_id,
        status,
        email: lookup(payload, email_path).map(|email| email.trim().to_ascii_lowercase()),
    })
}

fn lookup(payload: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(payload, |value, segment| value.get(segment))
        .and_then(Value::as_str)
        .map(str::to_string)
}
