//! End-to-end scan flow: capture, normalize, summarize, deliver.

use tracing::{info, instrument, warn};

use crate::capture::{capture_with_retry, CaptureRequest, CaptureResponse, DocumentScanner};
use crate::clock::{Clock, SystemClock};
use crate::delivery::{Companion, DeliveryCoordinator};
use crate::models::config::{ScanConfig, ScanMode};
use crate::models::payload::DeliveryPayload;
use crate::models::record::ScanRecord;
use crate::normalize::Normalizer;
use crate::retry::RetryPolicy;
use crate::summary::format_summary;

/// Whether a scan is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning,
}

/// Result of one scan, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// At least one record was captured and the first was delivered.
    Succeeded {
        summary: String,
        records: Vec<ScanRecord>,
        payload: DeliveryPayload,
    },
    /// Cancelled, or nothing usable was recognized.
    Empty { message: String },
    /// Capture or delivery failed. `summary` is set when records were captured.
    Failed {
        message: String,
        detail: String,
        summary: Option<String>,
    },
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Text shown to the user.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Succeeded { summary, .. } => summary,
            Self::Empty { message } => message,
            Self::Failed { message, .. } => message,
        }
    }
}

/// Drives a scan through capture and delivery.
pub struct ScanOrchestrator<S, C, K = SystemClock> {
    scanner: S,
    delivery: DeliveryCoordinator<C>,
    clock: K,
    config: ScanConfig,
    state: ScanState,
}

impl<S: DocumentScanner, C: Companion> ScanOrchestrator<S, C, SystemClock> {
    /// Orchestrator using the device date.
    pub fn new(scanner: S, companion: C, config: ScanConfig) -> Self {
        Self::with_clock(scanner, companion, SystemClock, config)
    }
}

impl<S: DocumentScanner, C: Companion, K: Clock> ScanOrchestrator<S, C, K> {
    pub fn with_clock(scanner: S, companion: C, clock: K, config: ScanConfig) -> Self {
        let delivery = DeliveryCoordinator::from_config(companion, &config.delivery);
        Self {
            scanner,
            delivery,
            clock,
            config,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn companion(&self) -> &C {
        self.delivery.companion()
    }

    /// Scan in the configured mode.
    pub async fn scan(&mut self) -> ScanOutcome {
        let mode = self.config.capture.mode;
        self.scan_with_mode(mode).await
    }

    /// Scan in `mode`. The state is `Scanning` until the outcome is returned.
    #[instrument(skip(self))]
    pub async fn scan_with_mode(&mut self, mode: ScanMode) -> ScanOutcome {
        self.state = ScanState::Scanning;
        let outcome = self.run(mode).await;
        self.state = ScanState::Idle;

        info!(success = outcome.is_success(), "scan finished");
        outcome
    }

    async fn run(&self, mode: ScanMode) -> ScanOutcome {
        let messages = &self.config.messages;
        let request = CaptureRequest::new(mode, &self.config.capture);
        let policy = RetryPolicy::for_capture(&self.config.capture);

        let raws = match capture_with_retry(&self.scanner, &request, &policy).await {
            Ok(CaptureResponse::Results(raws)) => raws,
            Ok(CaptureResponse::Cancelled) => {
                return ScanOutcome::Empty {
                    message: messages.card_not_supported.clone(),
                };
            }
            Err(e) => {
                warn!(error = %e, "capture failed");
                return ScanOutcome::Failed {
                    message: messages.capture_failed(mode).to_string(),
                    detail: e.to_string(),
                    summary: None,
                };
            }
        };

        let records = Normalizer::from_config(&self.config, mode).normalize_all(&raws);
        let Some(first) = records.first() else {
            return ScanOutcome::Empty {
                message: messages.card_not_supported.clone(),
            };
        };

        let summary = format_summary(&records, &messages.labels);
        let payload = DeliveryPayload::from_record(first, self.clock.today());

        if records.len() > 1 {
            info!(count = records.len(), "delivering first record only");
        }

        match self.delivery.deliver(&payload).await {
            Ok(()) => ScanOutcome::Succeeded {
                summary,
                records,
                payload,
            },
            Err(e) => ScanOutcome::Failed {
                message: messages.delivery_failed.clone(),
                detail: e.to_string(),
                summary: Some(summary),
            },
        }
    }
}
