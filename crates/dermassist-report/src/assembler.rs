use serde_json::Value;

use dermassist_core::codes::{classify, description, display_name};
use dermassist_core::{ClassificationResult, PatientProfile, RiskTier};

use crate::clock::{Clock, SystemClock};
use crate::document::{
    Align, Bar, Block, Cell, Column, Columns, Field, FieldGrid, Panel, ReportDocument, Section,
    SectionKind, Table, TableColumn, TableRow, TextBlock, TextSize, TextStyle,
};
use crate::error::ReportError;
use crate::ranker::{DifferentialEntry, rank};
use crate::settings::ReportSettings;
use crate::timestamp::{ScanMoment, format_generated_at};
use crate::visual::{self, palette};

/// Printed in place of a missing patient field so the grid keeps its shape.
pub const MISSING_FIELD: &str = "\u{2014}";

/// Composes screening reports from a scan and a patient profile.
///
/// Holds only read-only settings and a clock, so one composer can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct ReportComposer<C: Clock = SystemClock> {
    settings: ReportSettings,
    clock: C,
}

impl ReportComposer<SystemClock> {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> ReportComposer<C> {
    pub fn with_clock(settings: ReportSettings, clock: C) -> Self {
        Self { settings, clock }
    }

    /// Build the full report document.
    ///
    /// Missing or malformed fields degrade to placeholders. The only failure
    /// is a `raw_scores` value that is not a mapping, in which case nothing
    /// is returned.
    pub fn compose(
        &self,
        scan: &ClassificationResult,
        patient: &PatientProfile,
    ) -> Result<ReportDocument, ReportError> {
        let scores = scan.score_map()?;

        let label = scan.predicted_label.as_str();
        let tier = classify(label);
        let entries = rank(&scores, label);

        let report_id = report_id(scan.id);
        let generated_at = format_generated_at(self.clock.now());
        let moment = ScanMoment::from_raw(scan.created_at.as_deref());

        let sections = vec![
            self.header(&report_id, &generated_at),
            patient_section(patient, &moment, &report_id),
            self.primary_section(scan, tier),
            about_section(label),
            differential_section(&entries),
            recommendation_section(tier),
            self.footer(&generated_at),
        ];

        Ok(ReportDocument {
            title: self.settings.branding.document_title.clone(),
            author: self.settings.branding.author.clone(),
            report_id,
            generated_at,
            scan: moment,
            primary_tier: tier,
            sections,
        })
    }

    /// Decode loosely-typed store records, then [`compose`](Self::compose).
    pub fn compose_value(
        &self,
        scan: &Value,
        patient: &Value,
    ) -> Result<ReportDocument, ReportError> {
        let scan = ClassificationResult::from_value(scan)?;
        let patient = PatientProfile::from_value(patient)?;
        self.compose(&scan, &patient)
    }

    fn header(&self, report_id: &str, generated_at: &str) -> Section {
        let branding = &self.settings.branding;
        let brand = Column {
            weight: 105,
            background: None,
            lines: vec![
                TextBlock::new(
                    &branding.name,
                    TextStyle::new(TextSize::Title, palette::WHITE).bold(),
                ),
                TextBlock::new(
                    &branding.tagline,
                    TextStyle::new(TextSize::Small, palette::HEADER_TINT),
                ),
                TextBlock::new(
                    &branding.contact,
                    TextStyle::new(TextSize::Caption, palette::HEADER_MUTED),
                ),
            ],
        };
        let stamp = Column {
            weight: 58,
            background: None,
            lines: vec![
                TextBlock::new(
                    "SCREENING REPORT",
                    TextStyle::new(TextSize::Body, palette::WHITE)
                        .bold()
                        .align(Align::Right),
                ),
                TextBlock::new(
                    report_id,
                    TextStyle::new(TextSize::Small, palette::HEADER_TINT).align(Align::Right),
                ),
                TextBlock::new(
                    format!("Generated: {generated_at}"),
                    TextStyle::new(TextSize::Caption, palette::HEADER_MUTED).align(Align::Right),
                ),
            ],
        };

        Section {
            kind: SectionKind::Header,
            title: None,
            panel: Some(Panel {
                background: palette::BRAND_BLUE,
                border: None,
            }),
            blocks: vec![Block::Columns(Columns {
                columns: vec![brand, stamp],
            })],
        }
    }

    fn primary_section(&self, scan: &ClassificationResult, tier: RiskTier) -> Section {
        let label = scan.predicted_label.as_str();
        let tier_color = visual::tier_color(tier);
        let caption = TextStyle::new(TextSize::Caption, palette::BRAND_GRAY).bold();
        let centered_caption = caption.align(Align::Center);

        let diagnosis = Column {
            weight: 93,
            background: Some(visual::tier_background(tier)),
            lines: vec![
                TextBlock::new("PRIMARY DIAGNOSIS", caption),
                TextBlock::new(
                    display_name(label),
                    TextStyle::new(TextSize::Lead, palette::BRAND_DARK).bold(),
                ),
                TextBlock::new(
                    format!("Code: {}", label.to_uppercase()),
                    TextStyle::new(TextSize::Small, palette::BRAND_GRAY),
                ),
                TextBlock::new("RISK LEVEL", caption),
                TextBlock::new(
                    tier.label(),
                    TextStyle::new(TextSize::Emphasis, tier_color).bold(),
                ),
            ],
        };
        let confidence = Column {
            weight: 73,
            background: Some(palette::BRAND_LIGHT),
            lines: vec![
                TextBlock::new("AI CONFIDENCE SCORE", centered_caption),
                TextBlock::new(
                    format_confidence(scan.confidence_score),
                    TextStyle::new(TextSize::Display, palette::BRAND_BLUE)
                        .bold()
                        .align(Align::Center),
                ),
                TextBlock::new(
                    &self.settings.model.name,
                    TextStyle::new(TextSize::Small, palette::BRAND_GRAY).align(Align::Center),
                ),
                TextBlock::new(
                    &self.settings.model.runtime,
                    TextStyle::new(TextSize::Caption, palette::BRAND_GRAY).align(Align::Center),
                ),
            ],
        };

        Section {
            kind: SectionKind::PrimaryResult,
            title: Some("AI ANALYSIS RESULT".to_string()),
            panel: Some(Panel {
                background: palette::BRAND_LIGHT,
                border: Some(tier_color),
            }),
            blocks: vec![Block::Columns(Columns {
                columns: vec![diagnosis, confidence],
            })],
        }
    }

    fn footer(&self, generated_at: &str) -> Section {
        let settings = &self.settings;
        let fine_print = TextStyle::new(TextSize::Caption, palette::BRAND_GRAY);
        let right = fine_print.align(Align::Right);

        let notice = Column {
            weight: 115,
            background: None,
            lines: vec![
                TextBlock::new(
                    format!(
                        "**{}** · {}",
                        settings.branding.name, settings.branding.tagline
                    ),
                    fine_print,
                ),
                TextBlock::new(&settings.disclaimer, fine_print),
            ],
        };
        let metadata = Column {
            weight: 51,
            background: None,
            lines: vec![
                TextBlock::new(format!("**Report Date:** {generated_at}"), right),
                TextBlock::new(format!("**Model:** {}", settings.model.name), right),
                TextBlock::new(format!("**Classes:** {}", settings.model.classes), right),
            ],
        };

        Section {
            kind: SectionKind::Footer,
            title: None,
            panel: None,
            blocks: vec![
                Block::Rule,
                Block::Columns(Columns {
                    columns: vec![notice, metadata],
                }),
            ],
        }
    }
}

/// Compose with default settings and the system clock.
pub fn compose(
    scan: &ClassificationResult,
    patient: &PatientProfile,
) -> Result<ReportDocument, ReportError> {
    ReportComposer::new(ReportSettings::default()).compose(scan, patient)
}

/// `RPT-` plus the scan id left-padded with zeros to six digits.
pub fn report_id(scan_id: u64) -> String {
    format!("RPT-{scan_id:06}")
}

/// Confidence as a percentage with one decimal, e.g. `87.3%`.
pub fn format_confidence(confidence: f64) -> String {
    let confidence = if confidence.is_finite() { confidence } else { 0.0 };
    format!("{:.1}%", confidence * 100.0)
}

fn field(label: &str, value: Option<&str>) -> Field {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => Field {
            label: label.to_string(),
            value: v.to_string(),
            missing: false,
        },
        None => Field {
            label: label.to_string(),
            value: MISSING_FIELD.to_string(),
            missing: true,
        },
    }
}

fn patient_section(patient: &PatientProfile, moment: &ScanMoment, report_id: &str) -> Section {
    let fields = vec![
        field("PATIENT NAME", patient.full_name.as_deref()),
        field("SCAN DATE", Some(moment.date.as_str())),
        field("EMAIL ADDRESS", patient.email.as_deref()),
        field("SCAN TIME", Some(moment.time_label())),
        field("DATE OF BIRTH", patient.date_of_birth.as_deref()),
        field("GENDER", patient.gender.as_deref()),
        field("PHONE NUMBER", patient.phone_number.as_deref()),
        field("REPORT ID", Some(report_id)),
    ];

    Section {
        kind: SectionKind::PatientInfo,
        title: None,
        panel: Some(Panel {
            background: palette::BRAND_LIGHT,
            border: Some(palette::BRAND_BORDER),
        }),
        blocks: vec![Block::Fields(FieldGrid { columns: 2, fields })],
    }
}

fn about_section(label: &str) -> Section {
    Section {
        kind: SectionKind::AboutDiagnosis,
        title: Some("ABOUT THIS DIAGNOSIS".to_string()),
        panel: Some(Panel {
            background: palette::BRAND_LIGHT,
            border: Some(palette::BRAND_BORDER),
        }),
        blocks: vec![Block::Text(TextBlock::new(
            description(label),
            TextStyle::new(TextSize::Body, palette::BODY_TEXT),
        ))],
    }
}

fn differential_section(entries: &[DifferentialEntry]) -> Section {
    let columns = [
        ("CONDITION", 52),
        ("CODE", 17),
        ("RISK", 22),
        ("SCORE %", 22),
        ("VISUAL BAR", 53),
    ]
    .into_iter()
    .map(|(title, weight)| TableColumn {
        title: title.to_string(),
        weight,
    })
    .collect();

    let rows = entries.iter().map(differential_row).collect();

    Section {
        kind: SectionKind::Differential,
        title: Some("DIFFERENTIAL DIAGNOSIS \u{2014} ALL CLASS SCORES".to_string()),
        panel: None,
        blocks: vec![Block::Table(Table {
            columns,
            header_background: palette::BRAND_DARK,
            rows,
        })],
    }
}

fn differential_row(entry: &DifferentialEntry) -> TableRow {
    let primary = entry.is_primary;
    let accent = visual::color(entry.risk_tier, primary);
    let muted = palette::BRAND_GRAY;

    let name_color = if primary { palette::BRAND_DARK } else { muted };
    let risk_color = if primary {
        visual::tier_color(entry.risk_tier)
    } else {
        muted
    };
    let score_color = if primary { palette::BRAND_BLUE } else { muted };

    TableRow {
        cells: vec![
            Cell::Text(TextBlock::new(
                &entry.display_name,
                TextStyle::new(TextSize::Body, name_color).weight(primary),
            )),
            Cell::Text(TextBlock::new(
                entry.class_code.code().to_uppercase(),
                TextStyle::new(TextSize::Small, muted),
            )),
            Cell::Text(TextBlock::new(
                entry.risk_tier.short_label(),
                TextStyle::new(TextSize::Small, risk_color).bold(),
            )),
            Cell::Text(TextBlock::new(
                format!("{:.1}%", entry.score_percent),
                TextStyle::new(TextSize::Body, score_color).bold(),
            )),
            Cell::Bar(Bar {
                fraction: entry.bar_fraction,
                fill: accent,
                track: palette::BRAND_BORDER,
            }),
        ],
        emphasized: primary,
        background: primary.then_some(palette::PRIMARY_ROW),
    }
}

fn recommendation_section(tier: RiskTier) -> Section {
    let tier_color = visual::tier_color(tier);
    Section {
        kind: SectionKind::Recommendation,
        title: Some("RECOMMENDED ACTION".to_string()),
        panel: Some(Panel {
            background: visual::tier_background(tier),
            border: Some(tier_color),
        }),
        blocks: vec![Block::Text(TextBlock::new(
            tier.recommendation(),
            TextStyle::new(TextSize::Large, tier_color).bold(),
        ))],
    }
}
