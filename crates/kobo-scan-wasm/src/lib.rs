//! WASM bindings for identity document scan normalization.
//!
//! Raw recognizer results go in as plain JS objects; records, payloads and
//! summaries come back out. Capture and delivery stay on the host side.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use kobo_scan_core::models::config::SummaryLabels;
use kobo_scan_core::{
    compute_age, format_summary, BackOnlyPolicy, DeliveryPayload, Normalizer, ScanMode, ScanRecord,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Normalize raw recognizer results (one object or an array) into records.
///
/// `mode` is `"multi"` or `"single"`.
#[wasm_bindgen(js_name = normalizeResults)]
pub fn normalize_results(raw: JsValue, mode: &str) -> Result<JsValue, JsValue> {
    let normalizer = Normalizer::new(parse_mode(mode)?);
    to_js(&normalizer.normalize_all(&raw_results(raw)?))
}

/// Age in full years on `today_iso` (YYYY-MM-DD); 0 when the birth date is unreadable.
#[wasm_bindgen(js_name = computeAge)]
pub fn compute_age_js(date_of_birth: &str, today_iso: &str) -> Result<u32, JsValue> {
    Ok(compute_age(date_of_birth, parse_today(today_iso)?))
}

/// Build the companion payload for a record.
#[wasm_bindgen(js_name = buildPayload)]
pub fn build_payload(record: JsValue, today_iso: &str) -> Result<JsValue, JsValue> {
    let record: ScanRecord = serde_wasm_bindgen::from_value(record)?;
    let payload = DeliveryPayload::from_record(&record, parse_today(today_iso)?);
    to_js(&payload)
}

/// Format records as the labeled summary shown after a scan.
#[wasm_bindgen(js_name = formatSummary)]
pub fn format_summary_js(records: JsValue) -> Result<String, JsValue> {
    let records: Vec<ScanRecord> = serde_wasm_bindgen::from_value(records)?;
    Ok(format_summary(&records, &SummaryLabels::default()))
}

/// Normalizer with a configurable back-only policy.
#[wasm_bindgen]
pub struct ScanNormalizer {
    mode: ScanMode,
    back_only: BackOnlyPolicy,
}

#[wasm_bindgen]
impl ScanNormalizer {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<ScanNormalizer, JsValue> {
        Ok(Self {
            mode: parse_mode(mode)?,
            back_only: BackOnlyPolicy::default(),
        })
    }

    /// Accept results that carry only back-side data.
    #[wasm_bindgen(js_name = setAcceptBackOnly)]
    pub fn set_accept_back_only(&mut self, accept: bool) {
        self.back_only = if accept {
            BackOnlyPolicy::Accept
        } else {
            BackOnlyPolicy::Reject
        };
    }

    #[wasm_bindgen]
    pub fn normalize(&self, raw: JsValue) -> Result<JsValue, JsValue> {
        let normalizer = Normalizer::new(self.mode).with_back_only_policy(self.back_only);
        let raws = raw_results(raw)?;
        let records = normalizer.normalize_all(&raws);

        if records.len() < raws.len() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "kobo-scan: {} of {} results had no usable data",
                raws.len() - records.len(),
                raws.len()
            )));
        }
        to_js(&records)
    }
}

fn parse_mode(mode: &str) -> Result<ScanMode, JsValue> {
    match mode {
        "multi" | "multi_side" | "multiSide" => Ok(ScanMode::MultiSide),
        "single" | "single_side" | "singleSide" => Ok(ScanMode::SingleSide),
        other => Err(JsValue::from_str(&format!(
            "unknown scan mode '{other}' (expected \"multi\" or \"single\")"
        ))),
    }
}

fn parse_today(today_iso: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(today_iso, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("invalid date '{today_iso}': {e}")))
}

fn raw_results(raw: JsValue) -> Result<Vec<Value>, JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(raw)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Serialize as plain JS objects rather than `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn raw_js() -> JsValue {
        let raw = serde_json::json!({
            "frontVizResult": {
                "fullName": { "description": "AHMAD" },
                "dateOfBirth": { "originalDateStringResult": { "description": "15.06.1990" } }
            }
        });
        to_js(&raw).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compute_age() {
        assert_eq!(compute_age_js("15.06.1990", "2024-06-20").unwrap(), 34);
        assert_eq!(compute_age_js("garbage", "2024-06-20").unwrap(), 0);
        assert!(compute_age_js("15.06.1990", "20.06.2024").is_err());
    }

    #[wasm_bindgen_test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("multi").unwrap(), ScanMode::MultiSide);
        assert_eq!(parse_mode("single").unwrap(), ScanMode::SingleSide);
        assert!(parse_mode("both").is_err());
    }

    #[wasm_bindgen_test]
    fn test_normalize_and_payload() {
        let records = normalize_results(raw_js(), "multi").unwrap();
        let parsed: Vec<ScanRecord> = serde_wasm_bindgen::from_value(records.clone()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].front.full_name, "AHMAD");

        let summary = format_summary_js(records).unwrap();
        assert!(summary.starts_with("Full Name: AHMAD\n"));

        let record = to_js(&parsed[0]).unwrap();
        let payload: DeliveryPayload =
            serde_wasm_bindgen::from_value(build_payload(record, "2024-06-20").unwrap()).unwrap();
        assert_eq!(payload.age, 34);
    }

    #[wasm_bindgen_test]
    fn test_scan_normalizer_back_only() {
        let raw = serde_json::json!({
            "backVizResult": { "fullName": { "description": "BACK" } }
        });

        let mut normalizer = ScanNormalizer::new("multi").unwrap();
        let rejected: Vec<ScanRecord> =
            serde_wasm_bindgen::from_value(normalizer.normalize(to_js(&raw).unwrap()).unwrap())
                .unwrap();
        assert!(rejected.is_empty());

        normalizer.set_accept_back_only(true);
        let accepted: Vec<ScanRecord> =
            serde_wasm_bindgen::from_value(normalizer.normalize(to_js(&raw).unwrap()).unwrap())
                .unwrap();
        assert_eq!(accepted[0].front.full_name, "BACK");
    }
}
