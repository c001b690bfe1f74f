use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::CoreError;
use crate::lenient;
use crate::scores::ScoreMap;

/// Label assumed when a stored prediction carries none.
pub const DEFAULT_LABEL: &str = "nv";

/// A persisted prediction as supplied by the classification store.
///
/// `raw_scores` stays an undecoded JSON value: its shape is only checked when
/// a report is composed, so a malformed record can still be loaded and
/// inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    #[serde(default)]
    pub id: u64,
    #[serde(default = "default_label")]
    pub predicted_label: String,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(rename = "raw_output", alias = "raw_scores", default)]
    pub raw_scores: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

impl ClassificationResult {
    /// Decode a store record without trusting its field types.
    ///
    /// Only a missing record (`null`) or a non-object value is rejected;
    /// individual fields fall back to their defaults.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Err(CoreError::invalid_input("scan", "record is missing")),
            other => {
                return Err(CoreError::invalid_input(
                    "scan",
                    format!("expected an object, got {}", json_kind(other)),
                ));
            }
        };

        let raw_scores = obj
            .get("raw_output")
            .or_else(|| obj.get("raw_scores"))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(Self {
            id: lenient::id_field(obj, "id").unwrap_or(0),
            predicted_label: lenient::string_field(obj, "predicted_label")
                .unwrap_or_else(default_label),
            confidence_score: lenient::number_field(obj, "confidence_score").unwrap_or(0.0),
            raw_scores,
            created_at: lenient::string_field(obj, "created_at"),
        })
    }

    /// Decode `raw_scores` into per-class probabilities.
    pub fn score_map(&self) -> Result<ScoreMap, CoreError> {
        ScoreMap::from_value(&self.raw_scores)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
