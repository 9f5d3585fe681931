//! Dependents list normalization.

use serde_json::Value;

use crate::adapter::access::field_text;
use crate::models::record::Dependent;

/// Serialize the raw dependents value as a JSON array string.
///
/// Missing, null and empty-string values become `[]`. A string holding a JSON
/// array is re-serialized; any other value is wrapped in a one-element array.
pub fn normalize_dependents(raw: Option<&Value>) -> String {
    let array = match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => vec![Value::String(s.clone())],
        },
        Some(other) => vec![other.clone()],
    };

    Value::Array(array).to_string()
}

/// Parse a dependents JSON array into typed entries.
///
/// Returns `None` if `json` is not an array of objects.
pub fn parse_dependents(json: &str) -> Option<Vec<Dependent>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(json) else {
        return None;
    };

    items
        .iter()
        .map(|item| {
            item.is_object().then(|| Dependent {
                full_name: field_text(Some(item), &["fullName"]),
                date_of_birth: field_text(Some(item), &["dateOfBirth"]),
                sex: field_text(Some(item), &["sex"]),
                document_number: field_text(Some(item), &["documentNumber"]),
            })
        })
        .collect()
}
