//! Error types for the kobo-scan-core library.

use thiserror::Error;

/// Error type for configuration loading and validation.
///
/// Pipeline stages report their own errors (`AdapterError`, `CaptureError`,
/// `DeliveryError`); scan outcomes carry those as messages.
#[derive(Error, Debug)]
pub enum ScanError {
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while mapping a raw recognizer result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The raw value matches none of the known result shapes.
    #[error("unrecognized result shape (top-level keys: {keys})")]
    UnrecognizedShape { keys: String },
}

/// Errors raised by the recognition SDK capture call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The SDK rejected the license key.
    #[error("license rejected: {0}")]
    License(String),

    /// The SDK capture call failed.
    #[error("scanning failed: {0}")]
    Sdk(String),

    /// Capture kept failing after every allowed attempt.
    #[error("{message} (after {attempts} attempts)")]
    Exhausted { message: String, attempts: u32 },
}

/// Errors raised by one call to the companion application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompanionError {
    /// Payload lacks parameters the companion requires.
    #[error("missing required parameters: {0}")]
    MissingParameters(String),

    /// The companion app is not reachable.
    #[error("companion unavailable: {0}")]
    Unavailable(String),

    /// The companion rejected the payload.
    #[error("companion rejected data: {0}")]
    Rejected(String),

    /// Writing the handoff failed.
    #[error("handoff I/O failed: {0}")]
    Io(String),
}

/// Delivery gave up after exhausting its retry budget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery failed after {attempts} attempts: {source}")]
pub struct DeliveryError {
    /// Number of calls made to the companion.
    pub attempts: u32,
    /// Failure of the last attempt.
    #[source]
    pub source: CompanionError,
}

/// Result type for the kobo-scan library.
pub type Result<T> = std::result::Result<T, ScanError>;
