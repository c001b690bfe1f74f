use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::codes::ClassCode;
use crate::error::CoreError;
use crate::lenient;
use crate::models::classification::json_kind;

/// Per-class probabilities decoded from a raw model output.
///
/// Each score is kept exactly as the model produced it: values are not
/// required to sum to 1.0 and are never renormalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    scores: BTreeMap<ClassCode, f64>,
    ignored: Vec<String>,
}

impl ScoreMap {
    /// Decode the `raw_output` column of a stored prediction.
    ///
    /// Accepts a JSON object, a string holding a JSON object (how the store
    /// persists it), or `null` for "no scores". Keys outside the seven known
    /// codes are set aside; non-numeric values count as 0.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(obj) => Ok(Self::from_object(obj)),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(obj)) => Ok(Self::from_object(&obj)),
                Ok(other) => Err(CoreError::invalid_input(
                    "raw_scores",
                    format!("encoded value is {}, not a mapping", json_kind(&other)),
                )),
                Err(e) => Err(CoreError::invalid_input(
                    "raw_scores",
                    format!("not a JSON mapping: {e}"),
                )),
            },
            other => Err(CoreError::invalid_input(
                "raw_scores",
                format!("expected a mapping, got {}", json_kind(other)),
            )),
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let mut map = Self::default();
        for (key, value) in obj {
            match ClassCode::from_code(key) {
                Some(code) => {
                    map.scores.insert(code, lenient::number(value).unwrap_or(0.0));
                }
                None => map.ignored.push(key.clone()),
            }
        }
        map
    }

    /// Score for `code`, 0 when the model output omitted it.
    pub fn get(&self, code: ClassCode) -> f64 {
        self.scores.get(&code).copied().unwrap_or(0.0)
    }

    /// Keys that were present but are not one of the seven class codes.
    pub fn ignored_keys(&self) -> &[String] {
        &self.ignored
    }

    /// Sum over the seven known classes. Informational only.
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }
}
