use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::CoreError;
use crate::lenient;

use super::classification::json_kind;

/// Profile fields of the authenticated user the report is issued for.
/// Every field is optional; absent values render as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientProfile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl PatientProfile {
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Err(CoreError::invalid_input("patient", "record is missing")),
            other => {
                return Err(CoreError::invalid_input(
                    "patient",
                    format!("expected an object, got {}", json_kind(other)),
                ));
            }
        };

        Ok(Self {
            full_name: lenient::string_field(obj, "full_name"),
            email: lenient::string_field(obj, "email"),
            date_of_birth: lenient::string_field(obj, "date_of_birth"),
            gender: lenient::string_field(obj, "gender"),
            phone_number: lenient::string_field(obj, "phone_number"),
        })
    }
}
