//! Managerial competency self-assessment: questionnaire model, scoring engine,
//! narrative report generation and the HTTP-facing services around them.

pub mod candidates;
pub mod config;
pub mod error;
pub mod narrative;
pub mod progress;
pub mod questionnaire;
pub mod repository;
pub mod results;
pub mod scoring;
pub mod telemetry;
