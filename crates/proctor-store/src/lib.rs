// proctor-store: REST record-store client for quiz content and results
//
// Speaks PostgREST-style endpoints for the two flat record shapes the quiz
// UI consumes. All calls retry with exponential backoff on transient
// failures.

mod client;
mod models;

pub use client::{StoreClient, StoreConfig};
pub use models::{score_answers, CorrectOption, Participant, Quiz};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store API error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
