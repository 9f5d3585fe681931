//! Adapter and extractor combined into one normalization step.

use serde_json::Value;
use tracing::{debug, warn};

use crate::adapter::{Adaptation, RawAdapter};
use crate::error::AdapterError;
use crate::extract::FieldExtractor;
use crate::models::config::{BackOnlyPolicy, ScanConfig, ScanMode};
use crate::models::record::ScanRecord;

/// Turns raw recognizer results into [`ScanRecord`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    adapter: RawAdapter,
    extractor: FieldExtractor,
}

impl Normalizer {
    /// Normalizer for `mode` with default extraction settings.
    pub fn new(mode: ScanMode) -> Self {
        Self {
            adapter: RawAdapter::new(),
            extractor: FieldExtractor::new(mode),
        }
    }

    /// Normalizer for `mode` using the extraction settings in `config`.
    pub fn from_config(config: &ScanConfig, mode: ScanMode) -> Self {
        Self {
            adapter: RawAdapter::new().with_back_only_policy(config.extraction.back_only),
            extractor: FieldExtractor::new(mode).with_image_mime(&config.extraction.image_mime),
        }
    }

    pub fn with_back_only_policy(mut self, policy: BackOnlyPolicy) -> Self {
        self.adapter = self.adapter.with_back_only_policy(policy);
        self
    }

    pub fn mode(&self) -> ScanMode {
        self.extractor.mode()
    }

    /// Normalize one raw result.
    ///
    /// `Ok(None)` means the layout was recognized but carried no usable data.
    pub fn normalize(&self, raw: &Value) -> Result<Option<ScanRecord>, AdapterError> {
        match self.adapter.adapt(raw)? {
            Adaptation::Adapted(adapted) => Ok(Some(self.extractor.extract(&adapted))),
            Adaptation::Rejected(_) => Ok(None),
        }
    }

    /// Normalize a batch, skipping rejected and unrecognized results.
    ///
    /// Input order is preserved.
    pub fn normalize_all(&self, raws: &[Value]) -> Vec<ScanRecord> {
        let records: Vec<ScanRecord> = raws
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| match self.normalize(raw) {
                Ok(Some(record)) => Some(record),
                Ok(None) => {
                    debug!(index, "skipping result without usable data");
                    None
                }
                Err(e) => {
                    warn!(index, error = %e, "skipping unrecognized result");
                    None
                }
            })
            .collect();

        debug!(
            total = raws.len(),
            usable = records.len(),
            mode = ?self.mode(),
            "normalized recognizer results"
        );
        records
    }
}
