//! Document capture through the recognition SDK.
//!
//! The SDK itself lives outside this crate. It is reached through the
//! [`DocumentScanner`] port, which hands back raw results untouched.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CaptureError;
use crate::models::config::{CaptureConfig, ScanMode};
use crate::retry::{retry, RetryPolicy};

/// Overlay and image settings passed to the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSettings {
    pub return_full_document_image: bool,
    pub return_face_image: bool,
}

/// One capture request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    pub mode: ScanMode,
    pub license_key: String,
    pub settings: CaptureSettings,
}

impl CaptureRequest {
    /// Build a request for `mode` from capture settings.
    pub fn new(mode: ScanMode, config: &CaptureConfig) -> Self {
        Self {
            mode,
            license_key: config.license_key.clone(),
            settings: CaptureSettings {
                return_full_document_image: config.return_full_document_image,
                return_face_image: config.return_face_image,
            },
        }
    }
}

/// What the SDK returned.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResponse {
    /// User cancelled, or the SDK produced nothing.
    Cancelled,
    /// Raw recognizer results in SDK order.
    Results(Vec<Value>),
}

impl CaptureResponse {
    /// Interpret a recorded SDK return value.
    ///
    /// `null` and `[]` are a cancellation, an array is a list of results and
    /// any other value is a single result.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Cancelled,
            Value::Array(items) if items.is_empty() => Self::Cancelled,
            Value::Array(items) => Self::Results(items),
            other => Self::Results(vec![other]),
        }
    }
}

/// Port to the recognition SDK.
#[async_trait]
pub trait DocumentScanner: Send + Sync {
    /// Run one capture session.
    async fn scan(&self, request: &CaptureRequest) -> Result<CaptureResponse, CaptureError>;
}

#[async_trait]
impl<S: DocumentScanner + ?Sized> DocumentScanner for Box<S> {
    async fn scan(&self, request: &CaptureRequest) -> Result<CaptureResponse, CaptureError> {
        (**self).scan(request).await
    }
}

/// Call `scanner` with retries.
///
/// A cancellation is a successful call and is not retried.
pub async fn capture_with_retry<S: DocumentScanner + ?Sized>(
    scanner: &S,
    request: &CaptureRequest,
    policy: &RetryPolicy,
) -> Result<CaptureResponse, CaptureError> {
    debug!(mode = ?request.mode, "starting capture");

    let response = retry(policy, "capture", |_| scanner.scan(request))
        .await
        .map_err(|e| CaptureError::Exhausted {
            message: e.last.to_string(),
            attempts: e.attempts,
        })?;

    match &response {
        CaptureResponse::Cancelled => info!("capture cancelled"),
        CaptureResponse::Results(results) => info!(count = results.len(), "capture returned results"),
    }
    Ok(response)
}

/// Scanner that returns a pre-recorded SDK response.
#[derive(Debug, Clone)]
pub struct ReplayScanner {
    response: CaptureResponse,
}

impl ReplayScanner {
    pub fn new(response: CaptureResponse) -> Self {
        Self { response }
    }

    /// Replay a recorded SDK return value, see [`CaptureResponse::from_value`].
    pub fn from_value(value: Value) -> Self {
        Self::new(CaptureResponse::from_value(value))
    }
}

#[async_trait]
impl DocumentScanner for ReplayScanner {
    async fn scan(&self, request: &CaptureRequest) -> Result<CaptureResponse, CaptureError> {
        debug!(mode = ?request.mode, "replaying recorded capture");
        Ok(self.response.clone())
    }
}
