//! dermassist-report
//!
//! The report composition engine. Turns one classification result and a
//! patient profile into a structured, renderer-agnostic [`ReportDocument`].
//! Pure and synchronous: no I/O, no logging, no shared mutable state.

pub mod assembler;
pub mod clock;
pub mod document;
pub mod error;
pub mod ranker;
pub mod settings;
pub mod timestamp;
pub mod visual;

pub use assembler::{ReportComposer, compose};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::ReportDocument;
pub use error::ReportError;
pub use ranker::{DifferentialEntry, rank};
pub use settings::ReportSettings;

/// Risk classifier lookups, re-exported from the shared vocabulary.
pub use dermassist_core::codes::{classify, description, display_name};
