//! Canonical scan record produced from one accepted raw recognizer result.

use serde::{Deserialize, Serialize};

/// Version of the record layout emitted by this crate.
///
/// Revision 2 added the back block and `dependentsInfo`.
pub const SCHEMA_VERSION: u32 = 2;

/// Fields read from the front face of the document.
///
/// Every field is a plain `String`; absent source data is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedFrontFields {
    /// Holder's full name.
    pub full_name: String,

    /// Birth date exactly as printed (not validated here).
    pub date_of_birth: String,

    /// Primary document number.
    pub document_number: String,

    /// Father's name.
    pub fathers_name: String,

    /// Address on a single line.
    pub address: String,

    /// First token of the additional address information.
    pub province: String,

    /// Second token of the additional address information.
    pub district: String,

    /// Third token of the additional address information.
    pub village: String,

    /// Sex as printed.
    pub sex: String,
}

/// Fields read from the back face of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedBackFields {
    /// Issue date as printed.
    pub date_of_issue: String,

    /// Secondary document number.
    pub document_additional_number: String,

    /// Expiry date as printed.
    pub date_of_expiry: String,
}

impl NormalizedBackFields {
    /// Check if no back field carries data.
    pub fn is_empty(&self) -> bool {
        self.date_of_issue.is_empty()
            && self.document_additional_number.is_empty()
            && self.date_of_expiry.is_empty()
    }
}

/// One scanned document, independent of the raw SDK shape it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// Record layout revision.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Front face fields.
    pub front: NormalizedFrontFields,

    /// Back face fields.
    pub back: NormalizedBackFields,

    /// Front image as a data URI, or `""`.
    #[serde(default)]
    pub front_image: String,

    /// Back image as a data URI, or `""`.
    #[serde(default)]
    pub back_image: String,

    /// Dependents serialized as a JSON array.
    #[serde(default = "empty_json_array")]
    pub dependents_info: String,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn empty_json_array() -> String {
    "[]".to_string()
}

impl Default for ScanRecord {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            front: NormalizedFrontFields::default(),
            back: NormalizedBackFields::default(),
            front_image: String::new(),
            back_image: String::new(),
            dependents_info: empty_json_array(),
        }
    }
}

/// A dependent listed on the holder's document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub full_name: String,
    pub date_of_birth: String,
    pub sex: String,
    pub document_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults_fill_missing_keys() {
        let record: ScanRecord = serde_json::from_str(r#"{"front": {}, "back": {}}"#).unwrap();

        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert_eq!(record.front.full_name, "");
        assert_eq!(record.dependents_info, "[]");
        assert!(record.back.is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(ScanRecord::default()).unwrap();

        assert!(json["front"].get("fathersName").is_some());
        assert!(json["back"].get("documentAdditionalNumber").is_some());
        assert_eq!(json["dependentsInfo"], "[]");
    }
}
