//! Field extraction from adapted recognizer results.
//!
//! Extraction is total: every field read goes through
//! [`field_text`](crate::adapter::access::field_text) and ends in `""`, so a
//! partially empty result still produces a complete [`ScanRecord`].

pub mod address;
pub mod dependents;

pub use address::{split_address_parts, AddressParts};
pub use dependents::{normalize_dependents, parse_dependents};

use serde_json::Value;

use crate::adapter::access::{field_text, first_text};
use crate::adapter::AdaptedResult;
use crate::models::config::ScanMode;
use crate::models::record::{NormalizedBackFields, NormalizedFrontFields, ScanRecord, SCHEMA_VERSION};

/// Builds canonical records from adapted results.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    mode: ScanMode,
    image_mime: String,
}

impl FieldExtractor {
    /// Create an extractor for `mode` writing `image/jpg` data URIs.
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            image_mime: "image/jpg".to_string(),
        }
    }

    /// Set the MIME type used in image data URIs.
    pub fn with_image_mime(mut self, mime: impl Into<String>) -> Self {
        self.image_mime = mime.into();
        self
    }

    /// Recognizer mode this extractor targets.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Extract a full record. Never fails.
    pub fn extract(&self, adapted: &AdaptedResult<'_>) -> ScanRecord {
        let (back, front_image, back_image) = match self.mode {
            ScanMode::MultiSide => (
                self.extract_back(adapted),
                self.data_uri(
                    adapted
                        .full_document_front_image
                        .or(adapted.full_document_image),
                ),
                self.data_uri(adapted.full_document_back_image),
            ),
            ScanMode::SingleSide => (
                NormalizedBackFields::default(),
                self.data_uri(
                    adapted
                        .full_document_image
                        .or(adapted.full_document_front_image),
                ),
                String::new(),
            ),
        };

        ScanRecord {
            schema_version: SCHEMA_VERSION,
            front: self.extract_front(adapted),
            back,
            front_image,
            back_image,
            dependents_info: normalize_dependents(adapted.dependents_info),
        }
    }

    /// Extract front fields, falling back to the back visualization per field.
    pub fn extract_front(&self, adapted: &AdaptedResult<'_>) -> NormalizedFrontFields {
        let both = [adapted.front_viz, adapted.back_viz];
        let sides: &[Option<&Value>] = match self.mode {
            ScanMode::MultiSide => &both,
            ScanMode::SingleSide => &both[..1],
        };

        let additional = field_text(adapted.front_viz, &["additionalAddressInformation"]);
        let parts = split_address_parts(&additional);

        let fathers_name = match field_text(adapted.fathers_name, &[]) {
            name if name.is_empty() => first_text(sides, &["fathersName"]),
            name => name,
        };
        let address = match field_text(adapted.address, &[]) {
            address if address.is_empty() => first_text(sides, &["address"]),
            address => address,
        };

        NormalizedFrontFields {
            full_name: first_text(sides, &["fullName"]),
            date_of_birth: first_text(sides, &["dateOfBirth"]),
            document_number: first_text(sides, &["documentNumber"]),
            fathers_name,
            address: address::single_line(&address),
            province: parts.province,
            district: parts.district,
            village: parts.village,
            sex: first_text(sides, &["sex"]),
        }
    }

    /// Extract back fields. Single-side mode always yields an empty block.
    pub fn extract_back(&self, adapted: &AdaptedResult<'_>) -> NormalizedBackFields {
        if self.mode == ScanMode::SingleSide {
            return NormalizedBackFields::default();
        }

        let back = adapted.back_viz;
        NormalizedBackFields {
            date_of_issue: field_text(back, &["dateOfIssue"]),
            document_additional_number: field_text(back, &["documentAdditionalNumber"]),
            date_of_expiry: field_text(back, &["dateOfExpiry"]),
        }
    }

    fn data_uri(&self, image: Option<&Value>) -> String {
        image_data_uri(image, &self.image_mime)
    }
}

/// Wrap base64 image data in a data URI. Existing data URIs pass through.
pub fn image_data_uri(image: Option<&Value>, mime: &str) -> String {
    match image.and_then(Value::as_str).map(str::trim) {
        Some(data) if data.starts_with("data:") => data.to_string(),
        Some(data) if !data.is_empty() => format!("data:{mime};base64,{data}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Adaptation, RawAdapter};
    use crate::models::config::BackOnlyPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn extract(raw: &Value, mode: ScanMode) -> ScanRecord {
        extract_with(raw, mode, BackOnlyPolicy::Reject)
    }

    fn extract_with(raw: &Value, mode: ScanMode, policy: BackOnlyPolicy) -> ScanRecord {
        let adapter = RawAdapter::new().with_back_only_policy(policy);
        match adapter.adapt(raw).unwrap() {
            Adaptation::Adapted(adapted) => FieldExtractor::new(mode).extract(&adapted),
            Adaptation::Rejected(shape) => panic!("rejected {shape:?}"),
        }
    }

    fn multi_side_flat() -> Value {
        json!({
            "frontVizResult": {
                "fullName": { "description": "AHMAD KARIMI" },
                "dateOfBirth": { "originalDateStringResult": { "description": "15.06.1990" } },
                "documentNumber": { "description": "1400-0101-12345" },
                "sex": { "description": "" },
                "additionalAddressInformation": { "description": "Kabul Kabul District1 Village1" }
            },
            "backVizResult": {
                "sex": { "description": "M" },
                "fullName": { "description": "IGNORED" },
                "dateOfIssue": { "originalDateStringResult": { "description": "01.01.2020" } },
                "documentAdditionalNumber": { "description": "A-77" },
                "dateOfExpiry": { "originalDateStringResult": { "description": "01.01.2030" } }
            },
            "fathersName": { "description": "KARIM" },
            "address": { "description": "House 12\nStreet 4" },
            "dependentsInfo": [{ "fullName": { "latin": { "value": "SARA" } } }],
            "fullDocumentFrontImage": "RlJPTlQ=",
            "fullDocumentBackImage": "QkFDSw=="
        })
    }

    #[test]
    fn test_multi_side_record() {
        let record = extract(&multi_side_flat(), ScanMode::MultiSide);

        assert_eq!(
            record.front,
            NormalizedFrontFields {
                full_name: "AHMAD KARIMI".to_string(),
                date_of_birth: "15.06.1990".to_string(),
                document_number: "1400-0101-12345".to_string(),
                fathers_name: "KARIM".to_string(),
                address: "House 12 Street 4".to_string(),
                province: "Kabul".to_string(),
                district: "Kabul".to_string(),
                village: "District1".to_string(),
                sex: "M".to_string(),
            }
        );
        assert_eq!(
            record.back,
            NormalizedBackFields {
                date_of_issue: "01.01.2020".to_string(),
                document_additional_number: "A-77".to_string(),
                date_of_expiry: "01.01.2030".to_string(),
            }
        );
        assert_eq!(record.front_image, "data:image/jpg;base64,RlJPTlQ=");
        assert_eq!(record.back_image, "data:image/jpg;base64,QkFDSw==");
        assert_eq!(record.dependents_info, r#"[{"fullName":{"latin":{"value":"SARA"}}}]"#);
    }

    #[test]
    fn test_single_side_forces_empty_back() {
        let mut raw = multi_side_flat();
        raw["fullDocumentImage"] = json!("U0lOR0xF");

        let record = extract(&raw, ScanMode::SingleSide);

        assert!(record.back.is_empty());
        assert_eq!(record.back_image, "");
        assert_eq!(record.front_image, "data:image/jpg;base64,U0lOR0xF");
        // No back fallback in single-side mode.
        assert_eq!(record.front.sex, "");
    }

    #[test]
    fn test_partial_result_yields_empty_strings() {
        let raw = json!({ "frontVizResult": { "fullName": { "description": "ONLY NAME" } } });
        let record = extract(&raw, ScanMode::MultiSide);

        assert_eq!(record.front.full_name, "ONLY NAME");
        assert_eq!(record.front.date_of_birth, "");
        assert_eq!(record.front.province, "");
        assert_eq!(record.front.address, "");
        assert!(record.back.is_empty());
        assert_eq!(record.front_image, "");
        assert_eq!(record.dependents_info, "[]");
    }

    #[test]
    fn test_namespaced_record() {
        let raw = json!({
            "BlinkIdMultiSideRecognizer::Result": {
                "frontViz": {
                    "fullName": { "latin": { "value": "AHMAD" } },
                    "dateOfBirth": { "originalString": { "latin": { "value": "900615" } } }
                },
                "backViz": {
                    "dateOfExpiry": { "originalString": { "latin": { "value": "01.01.2030" } } }
                },
                "address": { "latin": { "value": "Line1\nLine2" } },
                "dependentsInfo": "[]",
                "fullDocumentFrontImage": "data:image/png;base64,AAAA"
            }
        });

        let record = extract(&raw, ScanMode::MultiSide);

        assert_eq!(record.front.full_name, "AHMAD");
        assert_eq!(record.front.date_of_birth, "900615");
        assert_eq!(record.front.address, "Line1 Line2");
        assert_eq!(record.back.date_of_expiry, "01.01.2030");
        assert_eq!(record.front_image, "data:image/png;base64,AAAA");
        assert_eq!(record.dependents_info, "[]");
    }

    #[test]
    fn test_back_only_fallback() {
        let raw = json!({
            "frontVizResult": { "empty": true },
            "backVizResult": {
                "fullName": { "description": "FROM BACK" },
                "documentNumber": { "description": "B-1" }
            }
        });

        let record = extract_with(&raw, ScanMode::MultiSide, BackOnlyPolicy::Accept);

        assert_eq!(record.front.full_name, "FROM BACK");
        assert_eq!(record.front.document_number, "B-1");
        assert_eq!(record.front.province, "");
    }

    #[test]
    fn test_image_data_uri() {
        assert_eq!(image_data_uri(Some(&json!("QQ==")), "image/jpeg"), "data:image/jpeg;base64,QQ==");
        assert_eq!(image_data_uri(Some(&json!("")), "image/jpg"), "");
        assert_eq!(image_data_uri(Some(&json!(null)), "image/jpg"), "");
        assert_eq!(image_data_uri(None, "image/jpg"), "");
    }
}
