use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dermassist_report::ReportDocument;

use crate::docx::DocxRenderer;
use crate::error::ExportError;
use crate::json::JsonRenderer;
use crate::markdown::MarkdownRenderer;
use crate::pdf::PdfRenderer;
use crate::styles::DocumentStyles;

/// Paints a composed report to bytes.
///
/// Implementations receive a finished document and never alter its content;
/// any layout decision beyond the document model is theirs.
pub trait Renderer: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Build the renderer for `format` with the given styles.
pub fn renderer_for(format: ExportFormat, styles: &DocumentStyles) -> Box<dyn Renderer> {
    match format {
        ExportFormat::Pdf => Box::new(PdfRenderer::new(styles.clone())),
        ExportFormat::Docx => Box::new(DocxRenderer::new(styles.clone())),
        ExportFormat::Markdown => Box::new(MarkdownRenderer::default()),
        ExportFormat::Json => Box::new(JsonRenderer { pretty: true }),
    }
}
