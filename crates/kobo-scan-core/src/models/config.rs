//! Configuration structures for the scan pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Main configuration for the kobo-scan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Recognition SDK capture configuration.
    pub capture: CaptureConfig,

    /// Result normalization configuration.
    pub extraction: ExtractionConfig,

    /// Companion delivery configuration.
    pub delivery: DeliveryConfig,

    /// User-facing strings.
    pub messages: MessagesConfig,
}

/// Which recognizer the SDK runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Front and back of the document.
    #[default]
    MultiSide,
    /// Front only; the back block is always empty.
    SingleSide,
}

/// Whether a result carrying only back-side data is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackOnlyPolicy {
    /// A result without front data is rejected.
    #[default]
    Reject,
    /// A result with back data only is accepted; front fields fall back to the back.
    Accept,
}

/// Capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Recognizer mode.
    pub mode: ScanMode,

    /// SDK license key (same key for every platform).
    pub license_key: String,

    /// Attempts made before capture is reported as failed.
    pub max_attempts: u32,

    /// Delay between capture attempts in milliseconds.
    pub retry_delay_ms: u64,

    /// Ask the SDK for full document images.
    pub return_full_document_image: bool,

    /// Ask the SDK for the face image.
    pub return_face_image: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::MultiSide,
            license_key: String::new(),
            max_attempts: 3,
            retry_delay_ms: 0,
            return_full_document_image: true,
            return_face_image: true,
        }
    }
}

/// Normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Handling of results without front data.
    pub back_only: BackOnlyPolicy,

    /// MIME type written into image data URIs.
    pub image_mime: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            back_only: BackOnlyPolicy::Reject,
            image_mime: "image/jpg".to_string(),
        }
    }
}

/// Companion delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 500,
        }
    }
}

/// Localized strings shown by the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Shown when a scan yields no usable record.
    pub card_not_supported: String,

    /// Shown when multi-side capture fails.
    pub multi_side_failed: String,

    /// Shown when single-side capture fails.
    pub single_side_failed: String,

    /// Shown when the companion handoff fails.
    pub delivery_failed: String,

    /// Field labels for the summary.
    pub labels: SummaryLabels,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            card_not_supported: "Card not supported or scanning was canceled".to_string(),
            multi_side_failed: "Multi-side scanning failed, please try again.".to_string(),
            single_side_failed: "Single-side scanning failed, please try again.".to_string(),
            delivery_failed: "Failed to send data to KoboCollect. Please try again.".to_string(),
            labels: SummaryLabels::default(),
        }
    }
}

impl MessagesConfig {
    /// Capture failure message for `mode`.
    pub fn capture_failed(&self, mode: ScanMode) -> &str {
        match mode {
            ScanMode::MultiSide => &self.multi_side_failed,
            ScanMode::SingleSide => &self.single_side_failed,
        }
    }
}

/// Labels used when formatting a record for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLabels {
    pub full_name: String,
    pub date_of_birth: String,
    pub document_number: String,
    pub fathers_name: String,
    pub address: String,
    pub sex: String,
    pub date_of_issue: String,
    pub document_additional_number: String,
    pub date_of_expiry: String,
}

impl Default for SummaryLabels {
    fn default() -> Self {
        Self {
            full_name: "Full Name".to_string(),
            date_of_birth: "Date of Birth".to_string(),
            document_number: "Document Number".to_string(),
            fathers_name: "Father's Name".to_string(),
            address: "Address".to_string(),
            sex: "Sex".to_string(),
            date_of_issue: "Date of Issue".to_string(),
            document_additional_number: "Document Additional Number".to_string(),
            date_of_expiry: "Date of Expiry".to_string(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capture.max_attempts == 0 {
            return Err(ScanError::Config(
                "capture.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.delivery.max_attempts == 0 {
            return Err(ScanError::Config(
                "delivery.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.extraction.image_mime.trim().is_empty() {
            return Err(ScanError::Config(
                "extraction.image_mime must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
