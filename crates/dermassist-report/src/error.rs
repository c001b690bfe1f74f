use thiserror::Error;

use dermassist_core::CoreError;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The scan or patient record cannot be interpreted at all.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<CoreError> for ReportError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidInput { field, reason } => {
                ReportError::InvalidInput(format!("{field}: {reason}"))
            }
            other => ReportError::InvalidInput(other.to_string()),
        }
    }
}
