//! Raw recognizer result adapter.
//!
//! The recognition SDK has returned its results in more than one layout over
//! time. Each known layout is a [`RawShape`] variant; [`RawAdapter::adapt`]
//! tries them in [`RawShape::PRIORITY`] order and yields a borrowed,
//! shape-agnostic [`AdaptedResult`].

pub mod access;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::AdapterError;
use crate::models::config::BackOnlyPolicy;

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Known layouts of a raw recognizer result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawShape {
    /// `{ frontVizResult, backVizResult, address, fullDocumentFrontImage, .. }`
    Flat,
    /// `{ "<Recognizer>::Result": { frontViz, backViz, address, .. } }`
    Namespaced,
}

impl RawShape {
    /// Order in which shapes are tried.
    pub const PRIORITY: [RawShape; 2] = [RawShape::Flat, RawShape::Namespaced];

    /// Locate this shape's parts inside `raw`, if `raw` has this layout.
    fn locate<'a>(self, raw: &'a Value) -> Option<ShapeView<'a>> {
        let map = raw.as_object()?;
        match self {
            RawShape::Flat => {
                let front = map.get("frontVizResult").or_else(|| map.get("vizResult"));
                let back = map.get("backVizResult");
                if front.is_none() && back.is_none() {
                    return None;
                }
                Some(ShapeView { container: raw, front, back })
            }
            RawShape::Namespaced => map.iter().find_map(|(key, inner)| {
                if !key.ends_with("::Result") {
                    return None;
                }
                let inner_map = inner.as_object()?;
                let front = inner_map.get("frontViz");
                let back = inner_map.get("backViz");
                if front.is_none() && back.is_none() {
                    return None;
                }
                Some(ShapeView { container: inner, front, back })
            }),
        }
    }
}

struct ShapeView<'a> {
    container: &'a Value,
    front: Option<&'a Value>,
    back: Option<&'a Value>,
}

/// Shape-agnostic view over one raw result.
///
/// Fields borrow from the raw value; absent parts are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptedResult<'a> {
    /// Layout the raw value was recognized as.
    pub shape: RawShape,
    /// Front visualization result (may be empty when back-only is accepted).
    pub front_viz: Option<&'a Value>,
    /// Back visualization result.
    pub back_viz: Option<&'a Value>,
    pub fathers_name: Option<&'a Value>,
    pub address: Option<&'a Value>,
    pub dependents_info: Option<&'a Value>,
    pub full_document_front_image: Option<&'a Value>,
    pub full_document_back_image: Option<&'a Value>,
    /// Single-side recognizers report their only image here.
    pub full_document_image: Option<&'a Value>,
}

impl<'a> AdaptedResult<'a> {
    fn from_view(shape: RawShape, view: ShapeView<'a>) -> Self {
        let container = view.container;
        Self {
            shape,
            front_viz: view.front.filter(|v| !is_empty_viz(Some(*v))),
            back_viz: view.back.filter(|v| !is_empty_viz(Some(*v))),
            fathers_name: container.get("fathersName"),
            address: container.get("address"),
            dependents_info: container.get("dependentsInfo"),
            full_document_front_image: container.get("fullDocumentFrontImage"),
            full_document_back_image: container.get("fullDocumentBackImage"),
            full_document_image: container.get("fullDocumentImage"),
        }
    }
}

/// Outcome of adapting a raw value whose layout was recognized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adaptation<'a> {
    /// Usable data was found.
    Adapted(AdaptedResult<'a>),
    /// The layout matched but carried no usable visualization data.
    Rejected(RawShape),
}

/// Maps raw recognizer results onto [`AdaptedResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RawAdapter {
    back_only: BackOnlyPolicy,
}

impl RawAdapter {
    /// Create an adapter that rejects back-only results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the back-only acceptance policy.
    pub fn with_back_only_policy(mut self, policy: BackOnlyPolicy) -> Self {
        self.back_only = policy;
        self
    }

    /// Adapt one raw result.
    ///
    /// Returns `Rejected` when the layout is known but the front visualization
    /// is missing or empty (and back-only data is not accepted), and
    /// `UnrecognizedShape` when no known layout matches.
    pub fn adapt<'a>(&self, raw: &'a Value) -> Result<Adaptation<'a>> {
        let mut recognized = None;

        for shape in RawShape::PRIORITY {
            let Some(view) = shape.locate(raw) else {
                continue;
            };
            recognized.get_or_insert(shape);

            let has_front = !is_empty_viz(view.front);
            let has_back = !is_empty_viz(view.back);

            if has_front || (self.back_only == BackOnlyPolicy::Accept && has_back) {
                debug!(?shape, has_front, has_back, "adapted raw result");
                return Ok(Adaptation::Adapted(AdaptedResult::from_view(shape, view)));
            }
        }

        match recognized {
            Some(shape) => {
                debug!(?shape, "raw result has no usable visualization data");
                Ok(Adaptation::Rejected(shape))
            }
            None => Err(AdapterError::UnrecognizedShape {
                keys: top_level_keys(raw),
            }),
        }
    }
}

/// Whether a visualization result is missing or carries no data.
pub fn is_empty_viz(viz: Option<&Value>) -> bool {
    match viz {
        Some(Value::Object(map)) => {
            map.get("empty").and_then(Value::as_bool) == Some(true)
                || map.iter().all(|(key, value)| key == "empty" || value.is_null())
        }
        _ => true,
    }
}

fn top_level_keys(raw: &Value) -> String {
    match raw.as_object() {
        Some(map) if !map.is_empty() => map.keys().cloned().collect::<Vec<_>>().join(", "),
        Some(_) => "none".to_string(),
        None => format!("not an object: {}", value_kind(raw)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
