use std::path::{Path, PathBuf};

use serde_json::Value;

use dermassist_core::{ClassificationResult, PatientProfile};
use dermassist_export::{ExportFormat, renderer_for};
use dermassist_report::{ReportComposer, ReportDocument};

use crate::config::DermAssistConfig;

#[derive(Debug)]
pub struct RenderedReport {
    pub document: ReportDocument,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    /// `<report id>.<ext>` inside `dir`.
    pub fn default_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!(
            "{}.{}",
            self.document.report_id,
            self.format.extension()
        ))
    }
}

pub fn read_json(path: &Path) -> eyre::Result<Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("{} is not valid JSON: {e}", path.display()))
}

/// Compose the report for one scan/patient pair and paint it in `format`.
pub fn render_report(
    config: &DermAssistConfig,
    scan: &Value,
    patient: &Value,
    format: ExportFormat,
) -> eyre::Result<RenderedReport> {
    let record = ClassificationResult::from_value(scan)?;
    let scores = record.score_map()?;
    if !scores.ignored_keys().is_empty() {
        tracing::warn!(
            scan_id = record.id,
            keys = ?scores.ignored_keys(),
            "ignored unknown class codes in raw scores"
        );
    }

    let patient = PatientProfile::from_value(patient)?;
    let document = ReportComposer::new(config.settings.clone()).compose(&record, &patient)?;
    if !document.scan.is_time_available() {
        tracing::warn!(
            report_id = %document.report_id,
            scan_date = %document.scan.date,
            "scan timestamp could not be parsed; time shown as N/A"
        );
    }

    let bytes = renderer_for(format, &config.styles).render(&document)?;
    tracing::info!(
        report_id = %document.report_id,
        format = %format,
        bytes = bytes.len(),
        "report rendered"
    );

    Ok(RenderedReport {
        document,
        format,
        bytes,
    })
}
