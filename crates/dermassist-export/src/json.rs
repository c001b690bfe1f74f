use dermassist_report::ReportDocument;

use crate::error::ExportError;
use crate::renderer::{ExportFormat, Renderer};

/// Serializes the document model itself, for web frontends that lay the
/// report out on their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        tracing::debug!(report_id = %document.report_id, bytes = bytes.len(), "rendered JSON");
        Ok(bytes)
    }
}
