//! Autosaved questionnaire progress.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{ProgressUpdate, TestProgress};
pub use router::progress_router;
pub use service::{ProgressRepository, ProgressService, ProgressServiceError};
