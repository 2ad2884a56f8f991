//! Error types for the allocation & projection engine

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Core Pipeline Errors
    // =============================

    /// The request failed validation before the pipeline started.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// All retry attempts against the prediction service were exhausted.
    /// This is the only fatal failure inside the pipeline.
    #[error("Prediction service unavailable: {0}")]
    PredictionUnavailable(String),

    /// A single instrument's quote could not be resolved.
    /// Absorbed per-candidate inside the planners, never surfaced to callers.
    #[error("Quote unavailable for {0}")]
    QuoteUnavailable(String),

    /// A single fund's NAV could not be resolved. Absorbed like quotes.
    #[error("NAV unavailable for {0}")]
    NavUnavailable(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
