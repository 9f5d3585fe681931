//! Path-based access into raw SDK values with `""` as the ultimate default.
//!
//! The recognition SDK encodes a text result differently across versions:
//! a bare string, `{ "description": .. }`, `{ "latin": { "value": .. } }`, or
//! a date wrapper such as `{ "originalDateStringResult": { "description": .. } }`.
//! [`text_of`] unwraps all of them, so extraction sites only name a path.

use serde_json::Value;

/// Wrapper keys tried, in order, when unwrapping a text result.
const TEXT_KEYS: &[&str] = &[
    "description",
    "latin",
    "value",
    "originalDateStringResult",
    "originalString",
];

/// Walk `path` from `root`. Returns `None` if any segment is missing.
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

/// Text of the SDK result at `path` under `root`, or `""`.
pub fn field_text(root: Option<&Value>, path: &[&str]) -> String {
    root.and_then(|r| lookup(r, path))
        .map(text_of)
        .unwrap_or_default()
}

/// First non-empty text at `path` across `roots`, or `""`.
pub fn first_text(roots: &[Option<&Value>], path: &[&str]) -> String {
    roots
        .iter()
        .map(|root| field_text(*root, path))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Unwrap one SDK text result into a plain string.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => TEXT_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .map(text_of)
            .find(|text| !text.is_empty())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
