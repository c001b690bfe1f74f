//! dermassist-core
//!
//! Pure domain vocabulary of the DermAssist screening report: the seven lesion
//! class codes, risk tiers and their fixed lookup tables, and the input records
//! handed over by the classification and identity stores.
//! No rendering or I/O dependency.

pub mod codes;
pub mod error;
pub mod lenient;
pub mod models;
pub mod scores;

pub use codes::{ClassCode, RiskTier};
pub use error::CoreError;
pub use models::classification::ClassificationResult;
pub use models::patient::PatientProfile;
pub use scores::ScoreMap;
