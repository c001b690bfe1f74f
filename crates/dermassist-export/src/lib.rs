//! dermassist-export
//!
//! Renderer adapters that paint a composed [`ReportDocument`] to bytes:
//! PDF, DOCX, Markdown (via Tera templates) and JSON.
//!
//! [`ReportDocument`]: dermassist_report::ReportDocument

pub mod docx;
pub mod error;
pub mod json;
pub mod markdown;
pub mod pdf;
pub mod renderer;
pub mod styles;

pub use error::ExportError;
pub use renderer::{ExportFormat, Renderer, renderer_for};
pub use styles::DocumentStyles;
